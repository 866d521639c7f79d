// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod extract;
pub mod ingest;
pub mod job;
pub mod metrics;
pub mod notify;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::config::{AppConfig, ConfigError};
pub use crate::extract::{extract_prizes, PrizeTable};
pub use crate::ingest::scheduler::DailySchedule;
pub use crate::ingest::types::{Entry, FeedProvider, Source};
pub use crate::job::{Delivery, Job, RunSummary};
pub use crate::notify::{Notifier, TelegramNotifier};
pub use crate::report::{build_report, Report};

use std::sync::Arc;

/// Wire HTTP providers and the Telegram notifier from `cfg`.
pub fn build_job(cfg: &AppConfig) -> anyhow::Result<Job> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let providers = ingest::http_providers(&cfg.sources, &client, cfg.fetch_timeout);
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::from_config(cfg, client));
    Ok(Job::new(providers, notifier).with_skip_empty_report(cfg.skip_empty_report))
}
