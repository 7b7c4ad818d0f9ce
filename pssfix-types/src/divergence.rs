use crate::table::TableRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an inconsistency between the variability model (problem space) and the build/code
/// artifacts (solution space).
///
/// The set is closed for dispatch purposes but tolerant on input: kinds this crate does not know
/// are preserved as [`DivergenceKind::Other`] so they can be counted and reported.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DivergenceKind {
    /// A variable referenced in build/code artifacts is not defined in the variability model.
    UndefinedVariable,
    /// A variable defined in the variability model is never referenced anywhere.
    UnusedVariable,
    Other(String),
}

impl DivergenceKind {
    pub const UNDEFINED_VARIABLE: &'static str = "undefined_variable";
    pub const UNUSED_VARIABLE: &'static str = "unused_variable";

    pub fn as_str(&self) -> &str {
        match self {
            DivergenceKind::UndefinedVariable => Self::UNDEFINED_VARIABLE,
            DivergenceKind::UnusedVariable => Self::UNUSED_VARIABLE,
            DivergenceKind::Other(s) => s,
        }
    }
}

impl From<String> for DivergenceKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::UNDEFINED_VARIABLE => DivergenceKind::UndefinedVariable,
            Self::UNUSED_VARIABLE => DivergenceKind::UnusedVariable,
            _ => DivergenceKind::Other(s),
        }
    }
}

impl From<&str> for DivergenceKind {
    fn from(s: &str) -> Self {
        DivergenceKind::from(s.to_string())
    }
}

impl From<DivergenceKind> for String {
    fn from(kind: DivergenceKind) -> Self {
        match kind {
            DivergenceKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One detected divergence.
///
/// Involvement fields hold whitespace-separated names exactly as the detector emitted them. They
/// default to empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub kind: DivergenceKind,

    #[serde(default)]
    pub variables: String,

    #[serde(default)]
    pub source_files: String,

    #[serde(default)]
    pub code_elements: String,

    /// Free-form detector message, carried through to exports untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Divergence {
    pub fn new(kind: impl Into<DivergenceKind>) -> Self {
        Self {
            kind: kind.into(),
            variables: String::new(),
            source_files: String::new(),
            code_elements: String::new(),
            message: None,
        }
    }

    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }

    pub fn with_source_files(mut self, source_files: impl Into<String>) -> Self {
        self.source_files = source_files.into();
        self
    }

    pub fn with_code_elements(mut self, code_elements: impl Into<String>) -> Self {
        self.code_elements = code_elements.into();
        self
    }

    pub fn involved_variables_string(&self) -> &str {
        &self.variables
    }

    pub fn involved_source_files_string(&self) -> &str {
        &self.source_files
    }

    pub fn involved_code_elements_string(&self) -> &str {
        &self.code_elements
    }
}

impl TableRow for Divergence {
    fn header(&self) -> Vec<String> {
        vec![
            "Kind".to_string(),
            "Variables".to_string(),
            "Source Files".to_string(),
            "Code Elements".to_string(),
        ]
    }

    fn content(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.variables.clone(),
            self.source_files.clone(),
            self.code_elements.clone(),
        ]
    }
}

/// File-level envelope produced by a divergence detector.
///
/// Reading is tolerant: unknown fields are ignored and optional fields may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergenceEnvelope {
    /// Schema identifier, e.g. "pss.divergences.v1".
    pub schema: String,

    pub tool: ToolInfo,

    #[serde(default)]
    pub divergences: Vec<Divergence>,

    /// Optional, detector-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}
