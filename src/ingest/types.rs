// src/ingest/types.rs
use anyhow::Result;

/// A named feed origin. Configured once at startup, never mutated afterwards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Source {
    pub label: String, // e.g., "Miền Bắc"
    pub url: String,
}

impl Source {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One feed item, as decoded. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub description: String, // raw, may carry <br> markup
    pub pub_date: String,    // passed through untouched
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    /// `Ok(vec![])` means the feed decoded but had no items; `Err` means the fetch failed.
    async fn fetch_entries(&self) -> Result<Vec<Entry>>;
    fn source(&self) -> &Source;
}
