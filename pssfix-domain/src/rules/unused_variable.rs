use crate::describe::{format_involved, join_alternatives};
use crate::rules::{CorrectionRule, RuleMeta};
use pssfix_types::{Divergence, DivergenceKind};

pub struct UnusedVariableRule;

impl CorrectionRule for UnusedVariableRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: "unused-variable",
            kind: DivergenceKind::UnusedVariable,
            title: "Unused Variable",
            summary: "A variable is defined in the variability model but never referenced by constraints, build, or code artifacts.",
        }
    }

    fn describe(&self, divergence: &Divergence) -> String {
        let variables = format_involved(divergence.involved_variables_string());

        join_alternatives([
            format!("Remove {variables} from the variability model"),
            format!(
                "Define at least one reference to {variables} as part of another variable's constraint in the variability model"
            ),
            format!("Define at least one reference to {variables} in a build or code artifact"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn always_offers_three_options() {
        let text = UnusedVariableRule.describe(
            &Divergence::new(DivergenceKind::UnusedVariable).with_variables("Y Z"),
        );
        assert_eq!(
            text,
            "Remove \"Y\" and \"Z\" from the variability model\n\
             OR\n\
             Define at least one reference to \"Y\" and \"Z\" as part of another variable's constraint in the variability model\n\
             OR\n\
             Define at least one reference to \"Y\" and \"Z\" in a build or code artifact"
        );
    }

    #[test]
    fn involvement_of_files_and_elements_is_ignored() {
        let plain = Divergence::new(DivergenceKind::UnusedVariable).with_variables("Y");
        let involved = plain
            .clone()
            .with_source_files("Makefile")
            .with_code_elements("foo bar");
        assert_eq!(
            UnusedVariableRule.describe(&plain),
            UnusedVariableRule.describe(&involved)
        );
    }
}
