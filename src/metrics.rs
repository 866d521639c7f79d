use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up before the first run).
pub fn describe_all() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_fetch_total", "Feed fetch attempts.");
        describe_counter!("feed_fetch_errors_total", "Feed fetch/parse failures.");
        describe_counter!("feed_empty_total", "Feeds that decoded with no items.");
        describe_histogram!("feed_fetch_ms", "Feed fetch + parse time in milliseconds.");
        describe_histogram!("feed_parse_ms", "Feed XML parse time in milliseconds.");
        describe_counter!("job_runs_total", "Completed and started job runs.");
        describe_counter!("notify_sent_total", "Reports delivered.");
        describe_counter!("notify_errors_total", "Report deliveries that failed.");
        describe_gauge!("job_last_run_ts", "Unix ts when the last job run finished.");
    });
}

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
/// Must be called from inside a tokio runtime.
pub fn install_exporter(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("prometheus: install exporter")?;
    describe_all();
    Ok(())
}
