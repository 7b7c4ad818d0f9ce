use pssfix_types::{Divergence, DivergenceKind};

mod undefined_variable;
mod unused_variable;

/// Generates the remediation text for one divergence kind.
///
/// Implementations are pure: the same divergence always yields the same text, and empty
/// involvement lists only suppress options, they never fail.
pub trait CorrectionRule: Send + Sync {
    fn meta(&self) -> RuleMeta;

    fn describe(&self, divergence: &Divergence) -> String;
}

/// Static description of a rule, used for registration and `list-rules`/`explain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Short user-facing key, e.g. "undefined-variable".
    pub key: &'static str,
    pub kind: DivergenceKind,
    pub title: &'static str,
    pub summary: &'static str,
}

pub fn builtin_rules() -> Vec<Box<dyn CorrectionRule>> {
    vec![
        Box::new(undefined_variable::UndefinedVariableRule),
        Box::new(unused_variable::UnusedVariableRule),
    ]
}
