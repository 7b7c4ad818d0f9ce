//! Core correction pipeline, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all filesystem operations are performed through the port
//! traits.

use crate::ports::{DivergenceSource, WritePort};
use crate::settings::CorrectSettings;
use anyhow::Context;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use pssfix_divergences::LoadedDivergences;
use pssfix_domain::{CorrectionBatch, Corrector, RegistryError, RuleRegistry};
use pssfix_render::render_corrections_md;
use pssfix_types::report::{CorrectionReport, ReportCorrection, ReportInput, ReportSummary, RunInfo};
use pssfix_types::{Divergence, TableRow, ToolInfo};
use tracing::{debug, warn};

pub const CORRECTIONS_JSON: &str = "corrections.json";
pub const CORRECTIONS_MD: &str = "corrections.md";

/// Error type for pipeline results. Both variants map to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid rule configuration: {0}")]
    Config(#[from] RegistryError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_correct`.
#[derive(Debug, Clone)]
pub struct CorrectOutcome {
    pub batch: CorrectionBatch,
    pub report: CorrectionReport,
}

/// Run the correction pipeline.
///
/// A missing `source` is not an error: it is logged once and produces an empty report. Inputs
/// that failed to load are recorded in the report and their divergences skipped.
pub fn run_correct(
    settings: &CorrectSettings,
    source: Option<&dyn DivergenceSource>,
    tool: ToolInfo,
) -> Result<CorrectOutcome, ToolError> {
    let started_at = Utc::now();
    let registry = RuleRegistry::builtin_without(&settings.disabled_rules)?;
    debug!(registry = ?registry, "assembled correction rules");

    let loaded = match source {
        Some(source) => Some(source.load_divergences()?),
        None => None,
    };

    let corrector = Corrector::new(&registry);
    let batch = corrector.correct_from(loaded.as_deref().map(usable_divergences));
    let report = build_report(
        &batch,
        loaded.as_deref().unwrap_or_default(),
        tool,
        started_at,
    );

    Ok(CorrectOutcome { batch, report })
}

/// Write `corrections.json` and `corrections.md` to the output directory.
pub fn write_correct_artifacts(
    outcome: &CorrectOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join(CORRECTIONS_JSON), json.as_bytes())?;

    let md = render_corrections_md(&outcome.report);
    writer.write_file(&out_dir.join(CORRECTIONS_MD), md.as_bytes())?;

    Ok(())
}

fn usable_divergences(loaded: &[LoadedDivergences]) -> Vec<Divergence> {
    let mut out = Vec::new();
    for l in loaded {
        match &l.envelope {
            Ok(env) => out.extend(env.divergences.iter().cloned()),
            Err(err) => {
                warn!(path = %l.path, error = %err, "skipping unreadable divergences");
            }
        }
    }
    out
}

pub(crate) fn build_report(
    batch: &CorrectionBatch,
    loaded: &[LoadedDivergences],
    tool: ToolInfo,
    started_at: DateTime<Utc>,
) -> CorrectionReport {
    let run = RunInfo {
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
    };
    let mut report = CorrectionReport::new(tool, run);
    report.result_name = batch.name().to_string();
    report.inputs = loaded.iter().map(to_report_input).collect();

    let skipped_inputs = loaded.iter().filter(|l| l.envelope.is_err()).count() as u64;
    report.summary = ReportSummary {
        received: batch.counters.received,
        provided: batch.counters.provided,
        uncorrected: batch.counters.uncorrected(),
        skipped_inputs,
    };

    if let Some(first) = batch.corrections.first() {
        report.header = first.header();
    }
    report.corrections = batch.corrections.iter().map(ReportCorrection::from).collect();
    report
}

fn to_report_input(l: &LoadedDivergences) -> ReportInput {
    match &l.envelope {
        Ok(env) => ReportInput {
            path: l.path.to_string(),
            schema: Some(env.schema.clone()),
            tool: Some(env.tool.name.clone()),
            error: None,
        },
        Err(err) => ReportInput {
            path: l.path.to_string(),
            schema: None,
            tool: None,
            error: Some(err.to_string()),
        },
    }
}
