// tests/config_env.rs
use std::env;

use xoso_notifier::{AppConfig, ConfigError, DailySchedule};

const VARS: [&str; 4] = ["TELEGRAM_TOKEN", "TELEGRAM_TO", "SCHEDULE_TZ", "FEED_SOURCES_PATH"];

fn clear() {
    for v in VARS {
        env::remove_var(v);
    }
}

#[serial_test::serial]
#[test]
fn from_env_requires_both_credentials() {
    clear();
    env::set_var("TELEGRAM_TOKEN", "abc");
    let e = AppConfig::from_env().unwrap_err();
    assert!(matches!(e, ConfigError::MissingVar("TELEGRAM_TO")));
    clear();
}

#[serial_test::serial]
#[test]
fn from_env_reads_credentials_and_sources_file() {
    clear();
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("sources.toml");
    std::fs::write(
        &p,
        r#"
[[sources]]
label = "Miền Nam"
url = "http://127.0.0.1/xsmn.rss"
"#,
    )
    .unwrap();

    env::set_var("TELEGRAM_TOKEN", "abc");
    env::set_var("TELEGRAM_TO", "-1001");
    env::set_var("FEED_SOURCES_PATH", p.display().to_string());
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.chat_id, "-1001");
    assert_eq!(cfg.sources.len(), 1);
    assert_eq!(cfg.sources[0].label, "Miền Nam");
    clear();
}

#[serial_test::serial]
#[test]
fn from_env_ignores_schedule_overrides() {
    clear();
    env::set_var("TELEGRAM_TOKEN", "abc");
    env::set_var("TELEGRAM_TO", "-1001");
    env::set_var("SCHEDULE_TZ", "Asia/Atlantis");
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(
        cfg.schedule,
        DailySchedule::parse("18:30", "Asia/Ho_Chi_Minh").unwrap()
    );
    clear();
}

#[serial_test::serial]
#[test]
fn missing_sources_file_is_a_config_error() {
    clear();
    env::set_var("TELEGRAM_TOKEN", "abc");
    env::set_var("TELEGRAM_TO", "-1001");
    env::set_var("FEED_SOURCES_PATH", "/definitely/not/here.toml");
    let e = AppConfig::from_env().unwrap_err();
    assert!(matches!(e, ConfigError::Sources(_)));
    clear();
}
