// src/ingest/scheduler.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;

use crate::config::ConfigError;
use crate::job::Job;

/// One firing per day at `at` local time in `tz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
    pub tz: Tz,
}

impl DailySchedule {
    /// `at` is `HH:MM` (or `HH:MM:SS`), `tz` an IANA name such as `Asia/Ho_Chi_Minh`.
    pub fn parse(at: &str, tz: &str) -> Result<Self, ConfigError> {
        let at_trim = at.trim();
        let time = NaiveTime::parse_from_str(at_trim, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(at_trim, "%H:%M:%S"))
            .map_err(|_| ConfigError::InvalidSchedule(at.to_string()))?;
        let tz: Tz = tz
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(tz.to_string()))?;
        Ok(Self { at: time, tz })
    }

    /// First instant strictly after `now` whose local wall time is `at`.
    ///
    /// Ambiguous local times (DST fall-back) take the earlier instant. A wall time
    /// skipped by a DST jump fires at the first valid minute after the gap.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut day = now.with_timezone(&self.tz).date_naive();
        loop {
            if let Some(at) = self.resolve(day.and_time(self.at)) {
                if at > now {
                    return at;
                }
            }
            day = match day.succ_opt() {
                Some(d) => d,
                None => return now,
            };
        }
    }

    fn resolve(&self, local: chrono::NaiveDateTime) -> Option<DateTime<Utc>> {
        if let Some(dt) = self.tz.from_local_datetime(&local).earliest() {
            return Some(dt.with_timezone(&Utc));
        }
        // inside a DST gap; walk forward until the wall clock exists again
        (1..=180).find_map(|m| {
            self.tz
                .from_local_datetime(&(local + Duration::minutes(m)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}

/// Sleep until each firing, then run the job to completion before computing the next one.
///
/// Each firing is computed strictly after the previous one, so a run that finishes
/// early never re-triggers the same slot. `max_runs = None` loops forever.
pub async fn run_daily(job: Arc<Job>, schedule: DailySchedule, max_runs: Option<usize>) {
    let mut last_fire: Option<DateTime<Utc>> = None;
    let mut runs = 0usize;

    loop {
        if max_runs.is_some_and(|max| runs >= max) {
            break;
        }

        let now = Utc::now();
        let from = match last_fire {
            Some(prev) if prev >= now => prev,
            _ => now,
        };
        let next = schedule.next_after(from);
        let local = next.with_timezone(&schedule.tz);
        tracing::info!(
            target: "scheduler",
            next = %local.format("%Y-%m-%d %H:%M %Z"),
            "waiting for next firing"
        );

        let wait = (next - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        let summary = job.run_once().await;
        last_fire = Some(next);
        runs += 1;

        tracing::info!(
            target: "scheduler",
            fetched = summary.fetched,
            empty = summary.empty,
            failed = summary.failed,
            delivery = ?summary.delivery,
            "scheduled run finished"
        );
    }
}

/// Spawn the daily loop on the runtime.
pub fn spawn_daily_scheduler(job: Arc<Job>, schedule: DailySchedule) -> JoinHandle<()> {
    tokio::spawn(run_daily(job, schedule, None))
}
