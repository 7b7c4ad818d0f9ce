//! Clap-free settings for the correction pipeline.

use camino::Utf8PathBuf;

/// Settings for [`run_correct`](crate::pipeline::run_correct).
#[derive(Debug, Clone)]
pub struct CorrectSettings {
    /// Directory holding `<detector>/divergences.json` files.
    pub input_dir: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    /// Rule keys or divergence kinds to leave unregistered.
    pub disabled_rules: Vec<String>,
}

impl Default for CorrectSettings {
    fn default() -> Self {
        Self {
            input_dir: Utf8PathBuf::from("artifacts"),
            out_dir: Utf8PathBuf::from("artifacts/pssfix"),
            disabled_rules: Vec::new(),
        }
    }
}
