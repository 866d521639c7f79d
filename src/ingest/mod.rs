// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod scheduler;
pub mod types;

use std::time::Duration;

use reqwest::Client;

use crate::ingest::providers::rss::RssFeedProvider;
use crate::ingest::types::{FeedProvider, Source};

/// One HTTP provider per configured source, sharing `client`, in source order.
pub fn http_providers(
    sources: &[Source],
    client: &Client,
    timeout: Duration,
) -> Vec<Box<dyn FeedProvider>> {
    sources
        .iter()
        .map(|s| {
            Box::new(RssFeedProvider::from_url(s.clone(), client.clone(), timeout))
                as Box<dyn FeedProvider>
        })
        .collect()
}
