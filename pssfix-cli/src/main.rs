mod config;
mod explain;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use pssfix_core::adapters::{FsDivergenceSource, FsWritePort};
use pssfix_core::pipeline::{run_correct, write_correct_artifacts};
use pssfix_core::settings::CorrectSettings;
use pssfix_domain::RuleRegistry;
use pssfix_types::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pssfix",
    version,
    about = "Suggests corrections for problem/solution space divergences in software product lines."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate corrections for detected divergences.
    Correct(CorrectArgs),
    /// List all available correction rules.
    ListRules(ListRulesArgs),
    /// Explain a correction rule and show an example correction.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct CorrectArgs {
    /// Root directory holding pssfix.toml (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Directory containing <detector>/divergences.json (default: <root>/artifacts).
    #[arg(long)]
    input_dir: Option<Utf8PathBuf>,

    /// Output directory for pssfix artifacts (default: <input_dir>/pssfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Rule key or divergence kind to disable (repeatable).
    #[arg(long = "disable-rule")]
    disable_rule: Vec<String>,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule key or divergence kind (e.g., "undefined-variable", "unused_variable").
    rule: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        eprintln!("error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Correct(args) => cmd_correct(args),
        Command::ListRules(args) => cmd_list_rules(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

fn cmd_correct(args: CorrectArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(&args.root).context("load pssfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_correct_args(
        &args.root,
        args.input_dir,
        args.out_dir,
        &args.disable_rule,
    );
    debug!(
        "merged config: input_dir={}, out_dir={}, disabled_rules={:?}",
        merged.input_dir, merged.out_dir, merged.disabled_rules
    );

    let settings = CorrectSettings {
        input_dir: merged.input_dir.clone(),
        out_dir: merged.out_dir.clone(),
        disabled_rules: merged.disabled_rules,
    };
    let source = FsDivergenceSource::new(settings.input_dir.clone());

    let outcome = run_correct(&settings, Some(&source), tool_info())?;
    write_correct_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .with_context(|| format!("write artifacts to {}", settings.out_dir))?;

    println!(
        "{}",
        pssfix_render::render_summary_line(&outcome.report.summary)
    );
    info!("wrote corrections to {}", settings.out_dir);
    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    let registry = RuleRegistry::builtin()?;

    match args.format {
        OutputFormat::Text => {
            println!("Available rules:\n");
            println!("  {:<22} {:<22} TITLE", "KEY", "KIND");
            println!("  {:<22} {:<22} -----", "---", "----");
            for meta in registry.metas() {
                println!("  {:<22} {:<22} {}", meta.key, meta.kind, meta.title);
            }
            println!();
            println!("Use 'pssfix explain <key>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = registry
                .metas()
                .into_iter()
                .map(|m| {
                    serde_json::json!({
                        "key": m.key,
                        "kind": m.kind.as_str(),
                        "title": m.title,
                        "summary": m.summary,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let registry = RuleRegistry::builtin()?;

    let Some(e) = explain::explain(&registry, &args.rule) else {
        let available = explain::list_rule_keys(&registry).join(", ");
        anyhow::bail!(
            "Unknown rule: '{}'\n\nAvailable rules: {}",
            args.rule,
            available
        );
    };

    println!("================================================================================");
    println!("RULE: {}", e.title);
    println!("================================================================================");
    println!();
    println!("Key:   {}", e.key);
    println!("Kind:  {}", e.kind);
    println!();

    println!("SUMMARY");
    println!("--------------------------------------------------------------------------------");
    println!("{}", e.summary);
    println!();

    println!("EXAMPLE DIVERGENCE");
    println!("--------------------------------------------------------------------------------");
    println!("Variables:     {}", e.example_input.variables);
    println!("Source files:  {}", e.example_input.source_files);
    println!("Code elements: {}", e.example_input.code_elements);
    println!();

    println!("EXAMPLE CORRECTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", e.example_output);
    println!();

    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "pssfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        commit: None,
    }
}
