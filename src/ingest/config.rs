// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

use crate::ingest::types::Source;

/// Built-in feeds, in report order.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "Miền Bắc",
            "https://xosodaiphat.com/ket-qua-xo-so-mien-bac-xsmb.rss",
        ),
        Source::new(
            "Miền Trung",
            "https://xosodaiphat.com/ket-qua-xo-so-mien-trung-xsmt.rss",
        ),
        Source::new(
            "Miền Nam",
            "https://xosodaiphat.com/ket-qua-xo-so-mien-nam-xsmn.rss",
        ),
    ]
}

/// Load sources from an explicit path. Supports TOML or JSON formats.
/// File order is report order.
pub fn load_sources_from(path: &Path) -> Result<Vec<Source>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<Source>> {
    let parsed = match hint_ext {
        "json" => parse_json(s),
        "toml" => parse_toml(s),
        _ => parse_toml(s).or_else(|_| parse_json(s)),
    }
    .map_err(|e| anyhow!("unsupported sources format: {e}"))?;

    let cleaned = clean_list(parsed);
    if cleaned.is_empty() {
        return Err(anyhow!("sources file lists no usable sources"));
    }
    Ok(cleaned)
}

fn parse_toml(s: &str) -> Result<Vec<Source>> {
    #[derive(serde::Deserialize)]
    struct TomlSources {
        sources: Vec<Source>,
    }
    let v: TomlSources = toml::from_str(s)?;
    Ok(v.sources)
}

fn parse_json(s: &str) -> Result<Vec<Source>> {
    let v: Vec<Source> = serde_json::from_str(s)?;
    Ok(v)
}

/// Trim, drop blanks, drop repeated labels (first wins). Order is kept.
fn clean_list(items: Vec<Source>) -> Vec<Source> {
    let mut out: Vec<Source> = Vec::with_capacity(items.len());
    for it in items {
        let label = it.label.trim();
        let url = it.url.trim();
        if label.is_empty() || url.is_empty() {
            continue;
        }
        if out.iter().any(|s| s.label == label) {
            continue;
        }
        out.push(Source::new(label, url));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_north_central_south() {
        let labels: Vec<_> = default_sources().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Miền Bắc", "Miền Trung", "Miền Nam"]);
    }

    #[test]
    fn toml_keeps_file_order_and_trims() {
        let toml = r#"
[[sources]]
label = " South "
url = "https://x.test/s.rss"

[[sources]]
label = "North"
url = "https://x.test/n.rss"

[[sources]]
label = ""
url = "https://x.test/blank.rss"
"#;
        let out = parse_sources(toml, "toml").unwrap();
        assert_eq!(
            out,
            vec![
                Source::new("South", "https://x.test/s.rss"),
                Source::new("North", "https://x.test/n.rss"),
            ]
        );
    }

    #[test]
    fn json_without_hint_and_duplicates() {
        let json = r#"[{"label":"A","url":"u1"},{"label":"A","url":"u2"},{"label":"B","url":"u3"}]"#;
        let out = parse_sources(json, "").unwrap();
        assert_eq!(out, vec![Source::new("A", "u1"), Source::new("B", "u3")]);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(parse_sources("[]", "json").is_err());
        assert!(parse_sources("not a config", "").is_err());
    }
}
