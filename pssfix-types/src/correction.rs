use crate::divergence::Divergence;
use crate::table::TableRow;
use std::sync::Arc;
use uuid::Uuid;

/// Column appended to the divergence table by every correction.
pub const CORRECTION_COLUMN: &str = "Correction";

/// Fixed namespace for deterministic correction ids.
const CORRECTION_NAMESPACE: Uuid = Uuid::from_u128(0x4f3c_9a1e_7d2b_4c6a_9e51_2b8d_0c47_a3f1);

/// A textual remediation suggestion for one divergence.
///
/// Created once by the rule dispatcher and immutable afterwards. The source divergence is shared,
/// not copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    divergence: Arc<Divergence>,
    description: String,
}

impl Correction {
    pub fn new(divergence: Arc<Divergence>, description: String) -> Self {
        Self {
            divergence,
            description,
        }
    }

    pub fn divergence(&self) -> &Divergence {
        &self.divergence
    }

    /// Multi-line remediation text; alternatives are separated by a line reading `OR`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stable id derived from the divergence, so reruns over the same input agree.
    pub fn id(&self) -> Uuid {
        let d = &self.divergence;
        let key = format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}",
            d.kind, d.variables, d.source_files, d.code_elements
        );
        Uuid::new_v5(&CORRECTION_NAMESPACE, key.as_bytes())
    }
}

impl TableRow for Correction {
    fn header(&self) -> Vec<String> {
        let mut header = self.divergence.header();
        header.push(CORRECTION_COLUMN.to_string());
        header
    }

    fn content(&self) -> Vec<String> {
        let mut row = self.divergence.content();
        row.push(self.description.clone());
        row
    }
}
