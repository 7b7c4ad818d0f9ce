//! Domain logic: turn divergences into human-readable corrections.
//!
//! This crate owns *which* rule applies to a divergence and *what* the remediation text says. It
//! does not own where divergences come from or where corrections go; that's `pssfix-core`.

mod corrector;
pub mod describe;
mod registry;
mod rules;

pub use corrector::{CorrectionBatch, CorrectionCounters, Corrector};
pub use registry::{RegistryError, RuleRegistry};
pub use rules::{CorrectionRule, RuleMeta, builtin_rules};
