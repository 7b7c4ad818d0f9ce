//! Rule explanation for the `pssfix explain` command.
//!
//! Explanations are built from the live rule registry, so the example shown is exactly what the
//! rule produces.

use pssfix_domain::{CorrectionRule, RuleRegistry};
use pssfix_types::{Divergence, DivergenceKind};

/// Rendered explanation of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleExplanation {
    pub key: &'static str,
    pub kind: String,
    pub title: &'static str,
    pub summary: &'static str,
    pub example_input: Divergence,
    pub example_output: String,
}

pub fn explain(registry: &RuleRegistry, name: &str) -> Option<RuleExplanation> {
    let rule = registry.lookup(name)?;
    Some(explain_rule(rule))
}

pub fn explain_rule(rule: &dyn CorrectionRule) -> RuleExplanation {
    let meta = rule.meta();
    let example_input = example_divergence(&meta.kind);
    let example_output = rule.describe(&example_input);
    RuleExplanation {
        key: meta.key,
        kind: meta.kind.to_string(),
        title: meta.title,
        summary: meta.summary,
        example_input,
        example_output,
    }
}

pub fn list_rule_keys(registry: &RuleRegistry) -> Vec<&'static str> {
    registry.metas().into_iter().map(|m| m.key).collect()
}

fn example_divergence(kind: &DivergenceKind) -> Divergence {
    match kind {
        DivergenceKind::UndefinedVariable => Divergence::new(kind.clone())
            .with_variables("CONFIG_FOO")
            .with_source_files("drivers/foo/Makefile")
            .with_code_elements("foo_probe foo_remove"),
        DivergenceKind::UnusedVariable => {
            Divergence::new(kind.clone()).with_variables("CONFIG_BAR")
        }
        DivergenceKind::Other(_) => Divergence::new(kind.clone()).with_variables("CONFIG_BAZ"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_by_key_and_kind() {
        let registry = RuleRegistry::builtin().unwrap();
        let by_key = explain(&registry, "undefined-variable").unwrap();
        let by_kind = explain(&registry, "undefined_variable").unwrap();
        assert_eq!(by_key, by_kind);
        assert_eq!(by_key.kind, "undefined_variable");
    }

    #[test]
    fn undefined_example_shows_all_three_options() {
        let registry = RuleRegistry::builtin().unwrap();
        let e = explain(&registry, "undefined-variable").unwrap();
        assert_eq!(e.example_output.lines().filter(|l| *l == "OR").count(), 2);
        assert!(e.example_output.contains("\"foo_probe\" and \"foo_remove\""));
    }

    #[test]
    fn unknown_rule_has_no_explanation() {
        let registry = RuleRegistry::builtin().unwrap();
        assert!(explain(&registry, "dead-code").is_none());
    }

    #[test]
    fn rule_keys_are_listed() {
        let registry = RuleRegistry::builtin().unwrap();
        let keys = list_rule_keys(&registry);
        assert!(keys.contains(&"undefined-variable"));
        assert!(keys.contains(&"unused-variable"));
    }
}
