use crate::describe::{format_involved, join_alternatives};
use crate::rules::{CorrectionRule, RuleMeta};
use pssfix_types::{Divergence, DivergenceKind};

pub struct UndefinedVariableRule;

impl UndefinedVariableRule {
    const KEY: &'static str = "undefined-variable";

    // TODO: point at the exact build-artifact lines once detectors report presence conditions
    // for build files; today only the controlled file names are known.
    fn build_option(variables: &str, files: &str) -> String {
        format!(
            "Remove references to {variables} in the build artifacts controlling the presence or absence of {files}"
        )
    }

    fn code_option(variables: &str, elements: &str) -> String {
        format!(
            "Remove references to {variables} in the conditions controlling the presence or absence of the following code elements: {elements}"
        )
    }
}

impl CorrectionRule for UndefinedVariableRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: Self::KEY,
            kind: DivergenceKind::UndefinedVariable,
            title: "Undefined Variable",
            summary: "A variable is referenced in build or code artifacts but not defined in the variability model.",
        }
    }

    fn describe(&self, divergence: &Divergence) -> String {
        let variables = format_involved(divergence.involved_variables_string());
        let files = format_involved(divergence.involved_source_files_string());
        let elements = format_involved(divergence.involved_code_elements_string());

        let mut options = vec![format!("Define {variables} in the variability model")];
        if !files.is_empty() {
            options.push(Self::build_option(&variables, &files));
        }
        if !elements.is_empty() {
            options.push(Self::code_option(&variables, &elements));
        }
        join_alternatives(options)
    }
}
