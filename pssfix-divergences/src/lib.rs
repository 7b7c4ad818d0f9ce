//! Divergence ingestion utilities.
//!
//! pssfix consumes divergences produced by an external detector. It intentionally does not
//! enforce strict schema validation here; a detector that emits extra fields or omits optional
//! ones still yields usable divergences.

mod load;

pub use load::{DIVERGENCES_FILE_NAME, DivergenceLoadError, LoadedDivergences, load_divergences};
