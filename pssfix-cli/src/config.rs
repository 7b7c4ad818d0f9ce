//! Configuration file loading for pssfix.
//!
//! Discovers and loads `pssfix.toml` from the working root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "pssfix.toml";

/// Top-level configuration from pssfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PssfixConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub rules: RulesConfig,
}

/// Where detector outputs are read from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding `<detector>/divergences.json` (relative to the root).
    pub dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for corrections.json / corrections.md (relative to the root).
    pub dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule keys or divergence kinds that should produce no corrections.
    pub disabled: Vec<String>,
}

/// Discover the pssfix.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a pssfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PssfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<PssfixConfig> {
    let config: PssfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<PssfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(PssfixConfig::default()),
    }
}

/// Configuration after merging the config file with CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub input_dir: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
    pub disabled_rules: Vec<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PssfixConfig,
}

impl ConfigMerger {
    pub fn new(config: PssfixConfig) -> Self {
        Self { config }
    }

    /// Merge with `correct` command arguments.
    ///
    /// Directories: CLI, then config file, then `<root>/artifacts` and `<input>/pssfix`.
    /// CLI `disable_rule` entries extend the config file list.
    pub fn merge_correct_args(
        self,
        root: &Utf8Path,
        cli_input_dir: Option<Utf8PathBuf>,
        cli_out_dir: Option<Utf8PathBuf>,
        cli_disabled: &[String],
    ) -> MergedConfig {
        let input_dir = cli_input_dir
            .or_else(|| self.config.input.dir.map(|d| root.join(d)))
            .unwrap_or_else(|| root.join("artifacts"));
        let out_dir = cli_out_dir
            .or_else(|| self.config.output.dir.map(|d| root.join(d)))
            .unwrap_or_else(|| input_dir.join("pssfix"));

        let mut disabled_rules = self.config.rules.disabled;
        for rule in cli_disabled {
            if !disabled_rules.contains(rule) {
                disabled_rules.push(rule.clone());
            }
        }

        MergedConfig {
            input_dir,
            out_dir,
            disabled_rules,
        }
    }
}
