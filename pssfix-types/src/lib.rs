//! Shared DTOs (schemas-as-code) for the pssfix workspace.
//!
//! # Design constraints
//! - Divergences are produced by an external detector and read "as found".
//! - Corrections are derived values; they are never read back as inputs.
//! - Prefer adding optional fields over changing semantics.

pub mod correction;
pub mod divergence;
pub mod report;
pub mod table;

pub use correction::Correction;
pub use divergence::{Divergence, DivergenceEnvelope, DivergenceKind, ToolInfo};
pub use table::TableRow;

/// Schema identifiers.
pub mod schema {
    pub const PSS_DIVERGENCES_V1: &str = "pss.divergences.v1";
    pub const PSSFIX_CORRECTIONS_V1: &str = "pssfix.corrections.v1";

    /// Name of the result stream corrections are published under.
    pub const RESULT_NAME: &str = "PSS_Corrections";
}
