//! Credscope - Credential-Exposure Scanner
//!
//! Crawls web targets within their domains, applies pattern-based
//! detection to pages and linked script assets, and produces
//! risk-classified findings aggregated across a batch.

mod batch;
mod config;
mod crawler;
mod error;
mod http;
mod patterns;
mod reporting;
mod scanner;
mod target;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::batch::BatchOrchestrator;
use crate::config::Config;
use crate::reporting::{formats, ExecutiveReport};
use crate::target::Target;

/// Credential-Exposure Scanner
#[derive(Parser, Debug)]
#[command(name = "credscope")]
#[command(author, version, about = "Scans web targets for leaked API keys, tokens and secrets", long_about = None)]
struct Cli {
    /// Target list file (.csv or .json)
    #[arg(short, long, env = "CREDSCOPE_TARGETS")]
    targets_file: Option<PathBuf>,

    /// Single target URL for a quick scan
    #[arg(long)]
    target: Option<String>,

    /// Report output path (.json or .csv)
    #[arg(short, long, env = "CREDSCOPE_OUTPUT")]
    output: Option<PathBuf>,

    /// Maximum concurrent target workers
    #[arg(long, env = "CREDSCOPE_MAX_THREADS")]
    max_threads: Option<usize>,

    /// Configuration file path
    #[arg(short, long, env = "CREDSCOPE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "CREDSCOPE_LOG_LEVEL")]
    log_level: String,

    /// Log file path (enables rolling file logging)
    #[arg(long, env = "CREDSCOPE_LOG_FILE")]
    log_file: Option<String>,

    /// Enable JSON structured logging
    #[arg(long, env = "CREDSCOPE_LOG_JSON")]
    log_json: bool,

    /// Generate default configuration and exit
    #[arg(long)]
    generate_config: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        return generate_default_config();
    }

    init_logging(&cli)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Credscope");

    let config = load_config(&cli)?;

    if cli.validate_config {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    let targets = load_targets(&cli)?;

    let orchestrator = BatchOrchestrator::new(config.clone());

    // Ctrl+C aborts the batch; in-flight results are still reported
    let cancel = orchestrator.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling batch");
            cancel.cancel();
        }
    });

    let batch = orchestrator.run(targets).await;
    let report = ExecutiveReport::from_batch(&batch);

    print_summary(&batch, &report);

    if let Some(output) = &cli.output {
        let extension = output
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json")
            .to_lowercase();

        let contents = match extension.as_str() {
            "csv" => formats::csv::generate(&batch, &config.report)?,
            _ => formats::json::generate(&batch, &config.report)?,
        };

        std::fs::write(output, contents)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        tracing::info!(path = %output.display(), "Report written");
    }

    // Findings are data, not failure: exit 0 even when every target failed
    Ok(())
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if let Some(log_path) = &cli.log_file {
        let path = std::path::Path::new(log_path);
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).map(|p| p.to_path_buf());
        let dir = match dir {
            Some(d) => d,
            None => Config::data_dir()
                .map(|d| d.join("logs"))
                .unwrap_or_else(|_| PathBuf::from(".")),
        };
        std::fs::create_dir_all(&dir).ok();
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("credscope.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, filename);

        if cli.log_json {
            subscriber
                .with(fmt::layer().json().with_writer(file_appender).with_ansi(false))
                .init();
        } else {
            subscriber
                .with(fmt::layer().with_writer(file_appender).with_ansi(false))
                .init();
        }
    } else if cli.log_json {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }

    Ok(())
}

/// Load configuration with CLI overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!(error::CredscopeError::Config(e).user_message()))?;

    if let Some(max_threads) = cli.max_threads {
        config.scanner.max_threads = max_threads;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!(error::CredscopeError::Config(e).user_message()))?;

    Ok(config)
}

/// Resolve the target list from CLI arguments
fn load_targets(cli: &Cli) -> Result<Vec<Target>> {
    if let Some(path) = &cli.targets_file {
        let targets = target::load_targets(path).map_err(error::CredscopeError::Loader);
        return targets.map_err(|e| anyhow::anyhow!(e.user_message()));
    }

    if let Some(url) = &cli.target {
        return Ok(vec![Target::new(url)]);
    }

    anyhow::bail!("No targets given. Use --targets-file <path> or --target <url>.")
}

/// Generate default configuration file
fn generate_default_config() -> Result<()> {
    let config = Config::default();
    let toml = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

    println!("{}", toml);
    Ok(())
}

/// Print the human-readable batch summary to stdout
fn print_summary(batch: &batch::BatchResult, report: &ExecutiveReport) {
    println!();
    println!("Batch scan complete");
    println!("  Targets scanned:    {}", batch.targets_scanned);
    println!("  Failed targets:     {}", batch.failed_targets.len());
    println!("  Success rate:       {:.1}%", report.success_rate);
    println!("  Total findings:     {}", batch.total_findings);
    println!("  High-risk findings: {}", batch.high_risk_findings);
    println!("  Pages scanned:      {}", report.performance.total_pages);
    println!("  Duration:           {:.1}s", batch.total_scan_time.as_secs_f64());

    if !report.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &report.recommendations {
            println!("  [{}] {}: {}", rec.priority, rec.title, rec.detail);
        }
    }
}
