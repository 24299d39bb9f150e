use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sqlfleet_adapter_sqlcmd::{ConfigResolver, SqlcmdProvider};
use sqlfleet_application::{Orchestrator, TargetWorker};
use sqlfleet_domain::{FleetConfig, Target};
use sqlfleet_ports::{ReportSink, TargetSource};
use sqlfleet_ui_presentation::summary_lines;

use crate::sink::CsvFileSink;
use crate::targets::{targets_from_args, FileTargetSource};

#[derive(Parser, Debug)]
#[command(name = "sqlfleet", version, about = "Assess a SQL Server fleet against operational best practices")]
pub struct Cli {
    /// Target list file: one host per line, host\INST1,INST2 for named
    /// instances.
    #[arg(long)]
    pub targets: Option<PathBuf>,

    /// Additional target, same syntax as a target-list line. Repeatable.
    #[arg(long = "target")]
    pub target_specs: Vec<String>,

    /// Config file; defaults to ~/.sqlfleet/config.yaml when present.
    #[arg(long, env = "SQLFLEET_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Result table path; overrides the configured one.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Per-query timeout in seconds; overrides the configured one.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Worker pool size; overrides the configured one.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Emit the full run as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = effective_config(&cli)?;
    let targets = gather_targets(&cli)?;
    ensure!(
        !targets.is_empty(),
        "no targets given; use --targets <file> or --target <host>"
    );
    info!(targets = targets.len(), "starting fleet assessment");

    let provider = Arc::new(SqlcmdProvider::new(config.sqlcmd.binary.clone()));
    let resolver = Arc::new(ConfigResolver::new(config.naming.clone()));
    let worker = TargetWorker::new(
        provider,
        resolver,
        Duration::from_secs(config.collection.timeout_secs),
    );
    let orchestrator = Orchestrator::new(worker, config.collection.max_concurrent_targets);

    let outcome = orchestrator.run_fleet(targets).await?;

    let sink = CsvFileSink::new(config.output.csv_path.clone());
    sink.export(&outcome)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in summary_lines(&outcome) {
            println!("{line}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Config file resolution: explicit flag or env var first, then the
/// per-user default location, then built-in defaults.
fn effective_config(cli: &Cli) -> Result<FleetConfig> {
    let mut config = match &cli.config {
        Some(path) => FleetConfig::load_from_path(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => FleetConfig::load_from_path(&path)?,
            _ => FleetConfig::default(),
        },
    };

    if let Some(timeout_secs) = cli.timeout_secs {
        config.collection.timeout_secs = timeout_secs;
    }
    if let Some(max_concurrent) = cli.max_concurrent {
        config.collection.max_concurrent_targets = max_concurrent;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| Path::new(&home).join(".sqlfleet").join("config.yaml"))
}

fn gather_targets(cli: &Cli) -> Result<Vec<Target>> {
    let mut targets = Vec::new();
    if let Some(path) = &cli.targets {
        targets.extend(FileTargetSource::new(path.clone()).load()?);
    }
    targets.extend(targets_from_args(&cli.target_specs));
    Ok(targets)
}
