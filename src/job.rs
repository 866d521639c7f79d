// src/job.rs
//! One run: fetch every source, extract the newest entry, build the report,
//! notify once.

use std::sync::Arc;

use futures::future::join_all;
use metrics::{counter, gauge};
use tokio::sync::Mutex;

use crate::extract::extract_prizes;
use crate::ingest::types::FeedProvider;
use crate::notify::Notifier;
use crate::report::{build_report, SourceOutcome, SourceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed,
    /// `skip_empty_report` was set and nothing rendered.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub empty: usize,
    pub failed: usize,
    pub delivery: Delivery,
    pub message: String,
}

pub struct Job {
    providers: Vec<Box<dyn FeedProvider>>,
    notifier: Arc<dyn Notifier>,
    skip_empty_report: bool,
    // held for the whole run so manual and scheduled triggers never overlap
    run_guard: Mutex<()>,
}

impl Job {
    /// `providers` order is report order.
    pub fn new(providers: Vec<Box<dyn FeedProvider>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            providers,
            notifier,
            skip_empty_report: false,
            run_guard: Mutex::new(()),
        }
    }

    pub fn with_skip_empty_report(mut self, skip: bool) -> Self {
        self.skip_empty_report = skip;
        self
    }

    pub fn source_count(&self) -> usize {
        self.providers.len()
    }

    async fn collect(&self) -> Vec<SourceResult> {
        let fetches = self.providers.iter().enumerate().map(|(position, p)| async move {
            let source = p.source().clone();
            let outcome = match p.fetch_entries().await {
                Ok(entries) => match entries.into_iter().next() {
                    Some(entry) => {
                        let table = extract_prizes(&entry.description);
                        tracing::info!(
                            source = %source.label,
                            title = %entry.title,
                            pub_date = %entry.pub_date,
                            locations = table.len(),
                            prizes = table.prize_count(),
                            "feed entry extracted"
                        );
                        SourceOutcome::Fetched { entry, table }
                    }
                    None => {
                        tracing::warn!(source = %source.label, "no items found");
                        counter!("feed_empty_total").increment(1);
                        SourceOutcome::Empty
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        source = %source.label,
                        url = %source.url,
                        error = %format!("{e:#}"),
                        "feed fetch failed; skipping source"
                    );
                    SourceOutcome::Failed(format!("{e:#}"))
                }
            };
            SourceResult {
                position,
                source,
                outcome,
            }
        });
        join_all(fetches).await
    }

    /// Never fails: fetch and delivery errors are logged and counted.
    pub async fn run_once(&self) -> RunSummary {
        let _running = self.run_guard.lock().await;
        crate::metrics::describe_all();
        counter!("job_runs_total").increment(1);
        tracing::info!(sources = self.providers.len(), "job run started");

        let results = self.collect().await;
        let (mut fetched, mut empty, mut failed) = (0usize, 0usize, 0usize);
        for r in &results {
            match r.outcome {
                SourceOutcome::Fetched { .. } => fetched += 1,
                SourceOutcome::Empty => empty += 1,
                SourceOutcome::Failed(_) => failed += 1,
            }
        }

        let report = build_report(results);
        tracing::debug!(message = %report.text, "report built");

        let delivery = if report.is_empty() && self.skip_empty_report {
            tracing::info!("nothing rendered; delivery suppressed");
            Delivery::Skipped
        } else {
            if report.is_empty() {
                tracing::warn!("no source produced data; sending headline-only report");
            }
            match self.notifier.send(&report.text).await {
                Ok(()) => {
                    counter!("notify_sent_total").increment(1);
                    tracing::info!(notifier = self.notifier.name(), "report delivered");
                    Delivery::Sent
                }
                Err(e) => {
                    counter!("notify_errors_total").increment(1);
                    tracing::warn!(
                        notifier = self.notifier.name(),
                        error = %format!("{e:#}"),
                        "report delivery failed"
                    );
                    Delivery::Failed
                }
            }
        };

        gauge!("job_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        tracing::info!(fetched, empty, failed, ?delivery, "job run finished");

        RunSummary {
            fetched,
            empty,
            failed,
            delivery,
            message: report.text,
        }
    }
}
