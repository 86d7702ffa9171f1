mod registry;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use uuid::Uuid;

use personagen_config::{load_config, validate_config, ConfigError, GenerationConfig};
use personagen_core::Person;
use personagen_eval::{evaluate_batch, load_people, EvalError};
use personagen_generate::output::{write_csv, write_json, write_ndjson};
use personagen_generate::{generate_batch, GenerateError, PersonEngine};
use registry::{init_run_logging, start_run, write_report, RunContext, RunPaths};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration:\n{0}")]
    InvalidConfig(String),
    #[error("batch failed invariant checks: {0} violation(s)")]
    InvariantViolations(u64),
}

#[derive(Parser, Debug)]
#[command(name = "personagen", version, about = "Synthetic person data generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch of synthetic people.
    Generate(GenerateArgs),
    /// Assemble family clusters with shared surnames and addresses.
    Families(FamiliesArgs),
    /// Evaluate an exported batch against the structural invariants.
    Check(CheckArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "people.csv",
            ExportFormat::Json => "people.json",
            ExportFormat::Ndjson => "people.ndjson",
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to a TOML or JSON generation config.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of people to generate; overrides the config.
    #[arg(long)]
    count: Option<u64>,
    /// Base RNG seed; overrides the config.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of logical workers; overrides the config.
    #[arg(long)]
    workers: Option<u32>,
    /// Export format.
    #[arg(long, value_enum, default_value = "json")]
    format: ExportFormat,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Optional extra copy of the export file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FamiliesArgs {
    /// Path to a TOML or JSON generation config.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of family clusters to assemble.
    #[arg(long)]
    families: u64,
    /// Base RNG seed; overrides the config.
    #[arg(long)]
    seed: Option<u64>,
    /// Export format.
    #[arg(long, value_enum, default_value = "json")]
    format: ExportFormat,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Optional extra copy of the export file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Batch export to evaluate (JSON array or NDJSON).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Exit with an error when any invariant is violated.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Families(args) => run_families(args),
        Command::Check(args) => run_check(args),
    }
}

/// Resolves the effective config: file (or defaults), then flag overrides,
/// then semantic validation. Warnings are returned for later logging.
fn resolve_config(
    path: Option<&PathBuf>,
    count: Option<u64>,
    seed: Option<u64>,
    workers: Option<u32>,
) -> Result<(GenerationConfig, Vec<String>), CliError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(count) = count {
        config.record_count = count;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(workers) = workers {
        config.workers = workers;
    }

    match validate_config(&config) {
        Ok(validated) => {
            let warnings = validated
                .warnings
                .iter()
                .map(|issue| format!("{} at {}: {}", issue.code, issue.path, issue.message))
                .collect();
            Ok((validated.config, warnings))
        }
        Err(report) => {
            let lines: Vec<String> = report
                .errors
                .iter()
                .map(|issue| format!("  {} at {}: {}", issue.code, issue.path, issue.message))
                .collect();
            Err(CliError::InvalidConfig(lines.join("\n")))
        }
    }
}

fn begin_run(
    command: &str,
    run_dir: PathBuf,
    config: GenerationConfig,
    warnings: &[String],
) -> Result<(String, RunPaths), CliError> {
    let run_id = Uuid::new_v4().to_string();
    let ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: command.to_string(),
        run_dir,
        config,
    };
    let paths = start_run(&ctx)?;
    init_run_logging(&paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, command);
    for warning in warnings {
        tracing::warn!(event = "config_warning", message = %warning);
    }
    Ok((run_id, paths))
}

fn write_export(
    paths: &RunPaths,
    format: ExportFormat,
    people: &[Person],
    out: Option<&PathBuf>,
) -> Result<PathBuf, CliError> {
    let export_path = paths.run_root.join(format.file_name());
    let file = BufWriter::new(File::create(&export_path)?);
    let written = match format {
        ExportFormat::Csv => write_csv(file, people)?,
        ExportFormat::Json => write_json(file, people)?,
        ExportFormat::Ndjson => write_ndjson(file, people)?,
    };
    tracing::info!(event = "export_written", path = %export_path.display(), written);

    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::copy(&export_path, out)?;
        tracing::info!(event = "export_copied", path = %out.display());
    }
    Ok(export_path)
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let (config, warnings) = resolve_config(
        args.config.as_ref(),
        args.count,
        args.seed,
        args.workers,
    )?;
    let (_, paths) = begin_run("generate", args.run_dir, config.clone(), &warnings)?;

    let batch = generate_batch(&config)?;
    write_export(&paths, args.format, &batch.people, args.out.as_ref())?;
    write_report(&paths, &batch.report)?;
    tracing::info!(event = "report_written", path = %paths.report_path.display());

    tracing::info!(
        event = "run_finished",
        status = "success",
        records = batch.people.len(),
        duration_ms = batch.report.elapsed_ms
    );
    Ok(())
}

/// Summary written to `report.json` for a families run.
#[derive(Debug, serde::Serialize)]
struct FamiliesReport {
    families: u64,
    record_count: u64,
    base_seed: u64,
    elapsed_ms: u64,
}

fn run_families(args: FamiliesArgs) -> Result<(), CliError> {
    let (config, warnings) = resolve_config(args.config.as_ref(), None, args.seed, None)?;
    let (_, paths) = begin_run("families", args.run_dir, config.clone(), &warnings)?;

    let timer = Instant::now();
    let mut engine = PersonEngine::new(config.clone());
    let clusters = engine.create_family_clusters(args.families as usize);
    let people: Vec<Person> = clusters.into_iter().flatten().collect();
    let elapsed_ms = timer.elapsed().as_millis() as u64;
    tracing::info!(
        event = "families_assembled",
        families = args.families,
        records = people.len(),
        elapsed_ms
    );

    write_export(&paths, args.format, &people, args.out.as_ref())?;
    write_report(
        &paths,
        &FamiliesReport {
            families: args.families,
            record_count: people.len() as u64,
            base_seed: config.seed,
            elapsed_ms,
        },
    )?;

    tracing::info!(event = "run_finished", status = "success", records = people.len());
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let (_, paths) = begin_run(
        "check",
        args.run_dir,
        GenerationConfig::default(),
        &[],
    )?;

    tracing::info!(event = "batch_loaded", path = %args.input.display());
    let people = load_people(&args.input)?;
    let report = evaluate_batch(&people)?;

    write_report(&paths, &report)?;
    tracing::info!(event = "report_written", path = %paths.report_path.display());

    println!("{}", serde_json::to_string_pretty(&report).map_err(registry::RegistryError::from)?);

    let violations = report.invariants.total();
    if violations > 0 {
        tracing::warn!(event = "invariants_violated", count = violations);
        if args.strict {
            return Err(CliError::InvariantViolations(violations));
        }
    }

    tracing::info!(event = "run_finished", status = "success", records = people.len());
    Ok(())
}
