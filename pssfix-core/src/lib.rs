//! Embeddable core library for pssfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into a larger analysis
//! pipeline or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DivergenceSource`](ports::DivergenceSource): load detector outputs
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_correct`](pipeline::run_correct): correct divergences and build a report
//! - [`write_correct_artifacts`](pipeline::write_correct_artifacts): persist the outcome

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export loader types so embedders don't need pssfix-divergences directly.
pub use pssfix_divergences::{DivergenceLoadError, LoadedDivergences};
