use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use pssfix_types::DivergenceEnvelope;
use thiserror::Error;
use tracing::debug;

pub const DIVERGENCES_FILE_NAME: &str = "divergences.json";

#[derive(Debug, Clone)]
pub struct LoadedDivergences {
    pub path: Utf8PathBuf,
    /// Directory name under the input dir (best effort).
    pub detector_id: String,
    pub envelope: Result<DivergenceEnvelope, DivergenceLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DivergenceLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

pub fn load_divergences(input_dir: &Utf8Path) -> anyhow::Result<Vec<LoadedDivergences>> {
    let pattern = input_dir.join("*").join(DIVERGENCES_FILE_NAME);
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning input dir for divergences");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob <input>/*/divergences.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();

        let utf8_path = Utf8PathBuf::from(path);
        let detector_id = utf8_path
            .parent()
            .and_then(|p| p.file_name())
            .unwrap_or("unknown")
            .to_string();

        // pssfix writes its own artifacts next to the detectors' outputs.
        if detector_id == "pssfix" {
            debug!(path = %utf8_path, "skipping pssfix's own output");
            continue;
        }

        let envelope = match fs::read_to_string(&utf8_path) {
            Ok(s) => serde_json::from_str::<DivergenceEnvelope>(&s).map_err(|e| {
                DivergenceLoadError::Json {
                    message: e.to_string(),
                }
            }),
            Err(e) => Err(DivergenceLoadError::Io {
                message: e.to_string(),
            }),
        };

        out.push(LoadedDivergences {
            path: utf8_path,
            detector_id,
            envelope,
        });
    }

    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
