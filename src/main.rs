//! xoso-notifier — binary entrypoint.
//! Loads configuration, then either runs the digest once (`--now`) or waits for the
//! daily firing and runs it every day.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xoso_notifier::ingest::scheduler::spawn_daily_scheduler;
use xoso_notifier::{build_job, AppConfig};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Run the job immediately without waiting for schedule
    #[arg(long)]
    now: bool,
}

/// `RUST_LOG` wins; otherwise info for this crate, warn for dependencies.
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("xoso_notifier=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Load .env in local/dev; plain environment otherwise.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if dotenv.is_err() {
        tracing::warn!(".env file not found, using system environment variables");
    }

    let cfg = AppConfig::from_env().context("loading configuration")?;
    tracing::debug!(?cfg, "configuration loaded");

    if let Some(addr) = cfg.metrics_addr {
        xoso_notifier::metrics::install_exporter(addr)?;
        tracing::info!(%addr, "metrics exporter listening");
    }

    let job = build_job(&cfg)?;

    if args.now {
        tracing::info!("running job immediately (--now)");
        job.run_once().await;
        return Ok(());
    }

    let schedule = cfg.schedule;
    tracing::info!(
        at = %schedule.at.format("%H:%M"),
        tz = %schedule.tz,
        sources = job.source_count(),
        "scheduler started"
    );
    spawn_daily_scheduler(Arc::new(job), schedule)
        .await
        .context("scheduler task stopped")?;
    Ok(())
}
