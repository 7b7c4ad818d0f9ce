use crate::rules::{self, CorrectionRule, RuleMeta};
use pssfix_types::{Correction, Divergence, DivergenceKind};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate correction rule for divergence kind `{kind}`: `{first}` and `{second}`")]
    DuplicateRule {
        kind: DivergenceKind,
        first: &'static str,
        second: &'static str,
    },

    #[error("unknown correction rule `{key}`")]
    UnknownRule { key: String },
}

/// Read-only table from divergence kind to the one rule that corrects it.
///
/// Built once at pipeline assembly and shared by reference afterwards.
pub struct RuleRegistry {
    rules: BTreeMap<DivergenceKind, Box<dyn CorrectionRule>>,
}

impl RuleRegistry {
    /// Registers `rules`, rejecting a second rule for an already registered kind.
    pub fn new(rules: Vec<Box<dyn CorrectionRule>>) -> Result<Self, RegistryError> {
        let mut table: BTreeMap<DivergenceKind, Box<dyn CorrectionRule>> = BTreeMap::new();
        for rule in rules {
            let meta = rule.meta();
            if let Some(existing) = table.get(&meta.kind) {
                return Err(RegistryError::DuplicateRule {
                    kind: meta.kind,
                    first: existing.meta().key,
                    second: meta.key,
                });
            }
            debug!(kind = %meta.kind, rule = meta.key, "registered correction rule");
            table.insert(meta.kind, rule);
        }
        Ok(Self { rules: table })
    }

    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(rules::builtin_rules())
    }

    /// Built-in rules minus those named in `disabled` (by rule key or divergence kind).
    pub fn builtin_without(disabled: &[String]) -> Result<Self, RegistryError> {
        let all = rules::builtin_rules();
        for name in disabled {
            let known = all.iter().any(|r| matches_name(&r.meta(), name));
            if !known {
                return Err(RegistryError::UnknownRule { key: name.clone() });
            }
        }

        let kept = all
            .into_iter()
            .filter(|r| {
                let meta = r.meta();
                !disabled.iter().any(|name| matches_name(&meta, name))
            })
            .collect();
        Self::new(kept)
    }

    /// Returns a correction for `divergence`, or `None` when no rule handles its kind.
    pub fn dispatch(&self, divergence: Arc<Divergence>) -> Option<Correction> {
        let rule = self.rules.get(&divergence.kind)?;
        let description = rule.describe(&divergence);
        Some(Correction::new(divergence, description))
    }

    pub fn rule_for(&self, kind: &DivergenceKind) -> Option<&dyn CorrectionRule> {
        self.rules.get(kind).map(|r| r.as_ref())
    }

    /// Looks a rule up by its key or by its divergence kind name.
    pub fn lookup(&self, name: &str) -> Option<&dyn CorrectionRule> {
        self.rules
            .values()
            .find(|r| matches_name(&r.meta(), name))
            .map(|r| r.as_ref())
    }

    pub fn metas(&self) -> Vec<RuleMeta> {
        self.rules.values().map(|r| r.meta()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|(k, r)| (k.as_str(), r.meta().key)))
            .finish()
    }
}

fn matches_name(meta: &RuleMeta, name: &str) -> bool {
    let name = name.trim();
    meta.key.eq_ignore_ascii_case(name) || meta.kind.as_str().eq_ignore_ascii_case(name)
}
