// src/config/app.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::ingest::config::{default_sources, load_sources_from};
use crate::ingest::scheduler::DailySchedule;
use crate::ingest::types::Source;
use crate::notify::telegram::DEFAULT_API_BASE;

// --- env names ---
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_TO: &str = "TELEGRAM_TO";
pub const ENV_TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_NOTIFY_TIMEOUT_SECS: &str = "NOTIFY_TIMEOUT_SECS";
pub const ENV_SKIP_EMPTY_REPORT: &str = "SKIP_EMPTY_REPORT";
pub const ENV_FEED_SOURCES_PATH: &str = "FEED_SOURCES_PATH";
pub const ENV_METRICS_ADDR: &str = "METRICS_ADDR";

// --- fixed daily firing; not read from the environment ---
pub const SCHEDULE_AT: &str = "18:30";
pub const SCHEDULE_TZ: &str = "Asia/Ho_Chi_Minh";

// --- defaults ---
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is missing")]
    MissingVar(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot load timezone {0:?}")]
    InvalidTimezone(String),

    #[error("invalid schedule time {0:?}, expected HH:MM")]
    InvalidSchedule(String),

    #[error("sources: {0:#}")]
    Sources(anyhow::Error),
}

/// Everything the job needs, resolved once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub chat_id: String,
    pub telegram_api_base: String,
    pub schedule: DailySchedule,
    pub fetch_timeout: Duration,
    pub notify_timeout: Duration,
    pub skip_empty_report: bool,
    pub sources: Vec<Source>,
    pub metrics_addr: Option<SocketAddr>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("token_len", &self.telegram_token.len())
            .field("chat_id", &self.chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("schedule", &self.schedule)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("notify_timeout", &self.notify_timeout)
            .field("skip_empty_report", &self.skip_empty_report)
            .field("sources", &self.sources)
            .field("metrics_addr", &self.metrics_addr)
            .finish()
    }
}

impl AppConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token =
            get(ENV_TELEGRAM_TOKEN).ok_or(ConfigError::MissingVar(ENV_TELEGRAM_TOKEN))?;
        let chat_id = get(ENV_TELEGRAM_TO).ok_or(ConfigError::MissingVar(ENV_TELEGRAM_TO))?;

        let telegram_api_base =
            get(ENV_TELEGRAM_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let schedule = DailySchedule::parse(SCHEDULE_AT, SCHEDULE_TZ)?;

        let fetch_timeout = Duration::from_secs(parse_secs(
            ENV_FETCH_TIMEOUT_SECS,
            get(ENV_FETCH_TIMEOUT_SECS),
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?);
        let notify_timeout = Duration::from_secs(parse_secs(
            ENV_NOTIFY_TIMEOUT_SECS,
            get(ENV_NOTIFY_TIMEOUT_SECS),
            DEFAULT_NOTIFY_TIMEOUT_SECS,
        )?);

        let skip_empty_report = match get(ENV_SKIP_EMPTY_REPORT) {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::InvalidValue {
                name: ENV_SKIP_EMPTY_REPORT,
                value: v.clone(),
                reason: "expected true/false/1/0".into(),
            })?,
        };

        let sources = match get(ENV_FEED_SOURCES_PATH) {
            None => default_sources(),
            Some(p) => load_sources_from(&PathBuf::from(p)).map_err(ConfigError::Sources)?,
        };

        let metrics_addr = match get(ENV_METRICS_ADDR) {
            None => None,
            Some(v) => Some(v.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
                name: ENV_METRICS_ADDR,
                value: v.clone(),
                reason: e.to_string(),
            })?),
        };

        Ok(Self {
            telegram_token,
            chat_id,
            telegram_api_base,
            schedule,
            fetch_timeout,
            notify_timeout,
            skip_empty_report,
            sources,
            metrics_addr,
        })
    }
}

fn parse_secs(name: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(v) = raw else {
        return Ok(default);
    };
    match v.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::InvalidValue {
            name,
            value: v,
            reason: "must be greater than zero".into(),
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            name,
            value: v,
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
