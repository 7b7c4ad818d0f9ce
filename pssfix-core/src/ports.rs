//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use pssfix_divergences::LoadedDivergences;

/// Source of detector outputs.
pub trait DivergenceSource {
    fn load_divergences(&self) -> anyhow::Result<Vec<LoadedDivergences>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
