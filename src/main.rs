//! anonaudit - Anonymous-access leak auditor
//!
//! Thin CLI over the audit library: runs the probe sweep and prints or
//! writes a report. Never influences verdict computation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use anonaudit::audit::{AuditSession, Auditor};
use anonaudit::config::AuditConfig;
use anonaudit::http::HttpTransport;
use anonaudit::pace::SleepPacer;
use anonaudit::probes::ProbeCatalog;
use anonaudit::report::{json, markdown, AuditReport, ReportMetadata};

/// Anonymous-access leak auditor for social platform public surfaces
#[derive(Parser, Debug)]
#[command(name = "anonaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target post/reel URL to audit with the default probe sweep
    target: Option<String>,

    /// CDN asset URL to probe (only your own content)
    #[arg(long)]
    cdn: Option<String>,

    /// Content identifier for the existence-oracle sweep (repeatable)
    #[arg(long = "shortcode")]
    shortcodes: Vec<String>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "ANONAUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "ANONAUDIT_LOG_LEVEL")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.target.is_none() && cli.cdn.is_none() && cli.shortcodes.is_empty() {
        anyhow::bail!("nothing to do: pass a target URL, --cdn, or --shortcode");
    }

    let config = AuditConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let transport = HttpTransport::new(&config).context("Failed to create HTTP transport")?;
    let catalog = ProbeCatalog::new(Arc::new(transport));
    let auditor = Auditor::new(catalog, Arc::new(SleepPacer::new(config.probe_delay_ms)));

    let mut session = AuditSession::new();

    if let Some(target) = &cli.target {
        auditor
            .run_sweep(&mut session, target)
            .await
            .context("Probe sweep failed")?;
    }

    if let Some(cdn_url) = &cli.cdn {
        let result = auditor
            .catalog()
            .cdn_media(cdn_url)
            .await
            .context("CDN probe failed")?;
        session.push(result);
    }

    if !cli.shortcodes.is_empty() {
        auditor
            .run_oracle(&mut session, &cli.shortcodes)
            .await
            .context("Existence-oracle sweep failed")?;
    }

    let target_label = cli
        .target
        .or(cli.cdn)
        .unwrap_or_else(|| "batch sweep".to_string());
    let report = AuditReport::new(&session, ReportMetadata::new(&target_label));

    let rendered = match cli.format {
        ReportFormat::Markdown => markdown::generate(&report)?,
        ReportFormat::Json => json::generate(&report)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
