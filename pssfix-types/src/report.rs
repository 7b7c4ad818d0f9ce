use crate::correction::Correction;
use crate::divergence::ToolInfo;
use crate::table::TableRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exported result of one correction batch (`corrections.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    /// Result stream label, always [`crate::schema::RESULT_NAME`].
    pub result_name: String,

    #[serde(default)]
    pub inputs: Vec<ReportInput>,

    pub summary: ReportSummary,

    /// Column names shared by every row in `corrections`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<String>,

    #[serde(default)]
    pub corrections: Vec<ReportCorrection>,
}

impl CorrectionReport {
    pub fn new(tool: ToolInfo, run: RunInfo) -> Self {
        Self {
            schema: crate::schema::PSSFIX_CORRECTIONS_V1.to_string(),
            tool,
            run,
            result_name: crate::schema::RESULT_NAME.to_string(),
            inputs: vec![],
            summary: ReportSummary::default(),
            header: vec![],
            corrections: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Set when the input could not be read or parsed; its divergences were skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub received: u64,
    pub provided: u64,

    /// Divergences whose kind has no registered rule.
    pub uncorrected: u64,

    #[serde(default)]
    pub skipped_inputs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCorrection {
    pub id: String,
    pub kind: String,
    pub description: String,

    /// The correction's table row; same width as [`CorrectionReport::header`].
    pub row: Vec<String>,
}

impl From<&Correction> for ReportCorrection {
    fn from(c: &Correction) -> Self {
        Self {
            id: c.id().to_string(),
            kind: c.divergence().kind.to_string(),
            description: c.description().to_string(),
            row: c.content(),
        }
    }
}
