use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::Notifier;
use crate::config::AppConfig;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramNotifier {
    endpoint: String, // carries the bot token; keep out of logs
    chat_id: String,
    client: Client,
    timeout: Duration,
}

// Manual Debug so the token never reaches a log line.
impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SendMessageForm<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: String) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, token, chat_id)
    }

    pub fn with_api_base(api_base: &str, token: &str, chat_id: String) -> Self {
        Self {
            endpoint: send_message_url(api_base, token),
            chat_id,
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_config(cfg: &AppConfig, client: Client) -> Self {
        Self::with_api_base(&cfg.telegram_api_base, &cfg.telegram_token, cfg.chat_id.clone())
            .with_client(client)
            .with_timeout(cfg.notify_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

pub(crate) fn send_message_url(api_base: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token)
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let form = SendMessageForm {
            chat_id: &self.chat_id,
            text,
        };

        // reqwest errors embed the URL; strip it so the token is not logged
        self.client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&form)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("telegram post")?
            .error_for_status()
            .map_err(|e| e.without_url())
            .context("telegram non-2xx")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
