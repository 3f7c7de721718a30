//! CLI host for the amlscope fraud-analysis engine.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use amlscope_core::EngineConfig;
use amlscope_engine::FraudEngine;

mod ingest;

#[derive(Parser)]
#[command(name = "amlscope")]
#[command(about = "Forensic analysis of transaction ledgers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a ledger CSV and emit the forensic report as JSON
    Analyze {
        /// Path to the ledger CSV
        input: PathBuf,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a YAML engine-configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use the strict review profile
        #[arg(long, conflicts_with = "config")]
        strict: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Print the engine configuration that would be used
    ShowConfig {
        /// Use the strict review profile
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
            strict,
            pretty,
        } => analyze(input, output, config, strict, pretty),
        Commands::ShowConfig { strict } => {
            let config = profile(strict);
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn profile(strict: bool) -> EngineConfig {
    if strict {
        EngineConfig::strict()
    } else {
        EngineConfig::default()
    }
}

fn analyze(
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    strict: bool,
    pretty: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => profile(strict),
    };

    let ledger = ingest::read_ledger(&input)?;
    info!(
        transactions = ledger.len(),
        input = %input.display(),
        "ledger ingested"
    );

    let engine = FraudEngine::new(config, ledger).context("engine rejected the ledger")?;
    let report = engine.run_analysis();

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            info!(output = %path.display(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
