pub mod telegram;

use anyhow::Result;

pub use telegram::TelegramNotifier;

/// Delivers one rendered report. One attempt per call.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}
