// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{Entry, FeedProvider, Source};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

pub struct RssFeedProvider {
    source: Source,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: Client, timeout: Duration },
}

impl RssFeedProvider {
    /// Serve a fixed XML document instead of hitting the network.
    pub fn from_fixture(source: Source, xml: &str) -> Self {
        Self {
            source,
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn from_url(source: Source, client: Client, timeout: Duration) -> Self {
        Self {
            source,
            mode: Mode::Http { client, timeout },
        }
    }

    pub fn parse_entries(xml: &str) -> Result<Vec<Entry>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;

        let out: Vec<Entry> = rss
            .channel
            .item
            .into_iter()
            .map(|it| Entry {
                title: html_escape::decode_html_entities(it.title.as_deref().unwrap_or_default())
                    .trim()
                    .to_string(),
                description: it.description.unwrap_or_default(),
                pub_date: it.pub_date.unwrap_or_default(),
            })
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        Ok(out)
    }

    async fn fetch_body(&self, client: &Client, timeout: Duration) -> Result<String> {
        let url = self.source.url.as_str();
        let resp = client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url} non-2xx"))?;
        resp.text()
            .await
            .with_context(|| format!("reading body of {url}"))
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch_entries(&self) -> Result<Vec<Entry>> {
        counter!("feed_fetch_total").increment(1);
        let t0 = std::time::Instant::now();

        let res = match &self.mode {
            Mode::Fixture(s) => Self::parse_entries(s),
            Mode::Http { client, timeout } => match self.fetch_body(client, *timeout).await {
                Ok(body) => Self::parse_entries(&body),
                Err(e) => Err(e),
            },
        };

        histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        if res.is_err() {
            counter!("feed_fetch_errors_total").increment(1);
        }
        res.with_context(|| format!("feed {}", self.source.label))
    }

    fn source(&self) -> &Source {
        &self.source
    }
}

/// HTML named entities that show up in real feeds but are not defined in XML.
/// CDATA sections are copied untouched; their text reaches the caller verbatim.
fn scrub_html_entities_for_xml(s: &str) -> String {
    const CDATA_OPEN: &str = "<![CDATA[";
    const CDATA_CLOSE: &str = "]]>";

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find(CDATA_OPEN) {
        out.push_str(&scrub_markup(&rest[..start]));
        let body = &rest[start..];
        // An unterminated section is left for the XML parser to reject.
        let end = body
            .find(CDATA_CLOSE)
            .map_or(body.len(), |i| i + CDATA_CLOSE.len());
        out.push_str(&body[..end]);
        rest = &body[end..];
    }
    out.push_str(&scrub_markup(rest));
    out
}

fn scrub_markup(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
