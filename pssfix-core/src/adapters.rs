//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{DivergenceSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pssfix_divergences::LoadedDivergences;
use tracing::debug;

/// Loads detector outputs from the filesystem via `pssfix_divergences::load_divergences`.
#[derive(Debug, Clone)]
pub struct FsDivergenceSource {
    pub input_dir: Utf8PathBuf,
}

impl FsDivergenceSource {
    pub fn new(input_dir: Utf8PathBuf) -> Self {
        Self { input_dir }
    }
}

impl DivergenceSource for FsDivergenceSource {
    fn load_divergences(&self) -> anyhow::Result<Vec<LoadedDivergences>> {
        pssfix_divergences::load_divergences(&self.input_dir)
            .with_context(|| format!("load divergences from {}", self.input_dir))
    }
}

/// In-memory divergence source for embedding and testing.
///
/// Drops pssfix's own output, identified by `detector_id` or by a parent directory named
/// `pssfix`, and sorts by path on construction to match `FsDivergenceSource`'s ordering.
/// Directories further up the path are not inspected.
#[derive(Debug, Clone)]
pub struct InMemoryDivergenceSource {
    loaded: Vec<LoadedDivergences>,
}

impl InMemoryDivergenceSource {
    pub fn new(mut loaded: Vec<LoadedDivergences>) -> Self {
        loaded.retain(|l| {
            let is_self = l.detector_id.eq_ignore_ascii_case("pssfix")
                || detector_dir(&l.path).is_some_and(|d| d.eq_ignore_ascii_case("pssfix"));
            if is_self {
                debug!(
                    path = l.path.as_str(),
                    detector_id = l.detector_id.as_str(),
                    "skipping pssfix output"
                );
            }
            !is_self
        });
        loaded.sort_by(|a, b| a.path.cmp(&b.path));
        Self { loaded }
    }
}

/// Name of the directory holding `divergences.json`, accepting either path separator.
fn detector_dir(path: &Utf8Path) -> Option<&str> {
    let mut parts = path.as_str().rsplit(['/', '\\']);
    parts.next()?;
    parts.next().filter(|d| !d.is_empty())
}

impl DivergenceSource for InMemoryDivergenceSource {
    fn load_divergences(&self) -> anyhow::Result<Vec<LoadedDivergences>> {
        Ok(self.loaded.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pssfix_divergences::DivergenceLoadError;
    use tempfile::TempDir;

    fn make_loaded(path: &str, detector_id: &str) -> LoadedDivergences {
        LoadedDivergences {
            path: Utf8PathBuf::from(path),
            detector_id: detector_id.to_string(),
            envelope: Err(DivergenceLoadError::Io {
                message: "stub".to_string(),
            }),
        }
    }

    #[test]
    fn in_memory_sorts_by_path() {
        let source = InMemoryDivergenceSource::new(vec![
            make_loaded("artifacts/z/divergences.json", "z"),
            make_loaded("artifacts/a/divergences.json", "a"),
            make_loaded("artifacts/m/divergences.json", "m"),
        ]);
        let loaded = source.load_divergences().unwrap();
        let paths: Vec<&str> = loaded.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "artifacts/a/divergences.json",
                "artifacts/m/divergences.json",
                "artifacts/z/divergences.json",
            ]
        );
    }

    #[test]
    fn in_memory_preserves_errors() {
        let source =
            InMemoryDivergenceSource::new(vec![make_loaded("artifacts/bad/divergences.json", "bad")]);
        let loaded = source.load_divergences().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].envelope.is_err());
    }

    #[test]
    fn in_memory_filters_pssfix_by_detector_id() {
        let source =
            InMemoryDivergenceSource::new(vec![make_loaded("some/arbitrary/path.json", "pssfix")]);
        assert!(source.load_divergences().unwrap().is_empty());
    }

    #[test]
    fn in_memory_filters_pssfix_by_backslash_path() {
        let source = InMemoryDivergenceSource::new(vec![make_loaded(
            r"C:\repo\Artifacts\PSSFIX\divergences.json",
            "unknown",
        )]);
        assert!(source.load_divergences().unwrap().is_empty());
    }

    #[test]
    fn in_memory_keeps_inputs_below_an_ancestor_named_pssfix() {
        let source = InMemoryDivergenceSource::new(vec![
            make_loaded("/work/pssfix/artifacts/kconfig/divergences.json", "kconfig"),
            make_loaded(r"C:\work\pssfix\artifacts\kconfig\divergences.json", "kconfig"),
            make_loaded("/work/pssfix/artifacts/pssfix/divergences.json", "pssfix"),
        ]);
        let loaded = source.load_divergences().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|l| l.detector_id == "kconfig"));
    }

    #[test]
    fn in_memory_agrees_with_fs_source_under_pssfix_checkout() {
        let temp = TempDir::new().expect("temp dir");
        let input =
            Utf8PathBuf::from_path_buf(temp.path().join("pssfix").join("artifacts")).expect("utf8");
        std::fs::create_dir_all(input.join("kconfig")).expect("mkdir");
        std::fs::write(
            input.join("kconfig").join("divergences.json"),
            r#"{ "schema": "pss.divergences.v1", "tool": { "name": "kconfig" },
                 "divergences": [ { "kind": "unused_variable", "variables": "X" } ] }"#,
        )
        .expect("write");

        let from_fs = FsDivergenceSource::new(input).load_divergences().expect("load");
        let in_memory = InMemoryDivergenceSource::new(from_fs.clone())
            .load_divergences()
            .expect("load");
        assert_eq!(from_fs.len(), 1);
        assert_eq!(in_memory.len(), from_fs.len());
    }

    #[test]
    fn fs_source_loads_from_input_dir() {
        let temp = TempDir::new().expect("temp dir");
        let input = Utf8PathBuf::from_path_buf(temp.path().join("artifacts")).expect("utf8");
        std::fs::create_dir_all(input.join("kconfig")).expect("mkdir");
        std::fs::write(
            input.join("kconfig").join("divergences.json"),
            r#"{ "schema": "pss.divergences.v1", "tool": { "name": "kconfig" }, "divergences": [] }"#,
        )
        .expect("write");

        let source = FsDivergenceSource::new(input);
        let loaded = source.load_divergences().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].detector_id, "kconfig");
        assert!(loaded[0].envelope.is_ok());
    }

    #[test]
    fn fs_write_port_writes_and_creates_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let target = root.join("nested").join("file.txt");

        let port = FsWritePort;
        port.write_file(&target, b"hello").expect("write");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "hello");

        let extra_dir = root.join("extra");
        port.create_dir_all(&extra_dir).expect("mkdir");
        assert!(extra_dir.exists());
    }
}
