// src/report.rs
//! Report builder: folds per-source results into the outgoing message.

use std::fmt::Write as _;

use crate::extract::PrizeTable;
use crate::ingest::types::{Entry, Source};

pub const REPORT_HEADLINE: &str = "🎰 Kết quả xổ số hôm nay";

#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Fetched { entry: Entry, table: PrizeTable },
    /// Feed decoded but had no items.
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceResult {
    /// Index in the configured source list.
    pub position: usize,
    pub source: Source,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub rendered_sources: usize,
}

impl Report {
    /// Nothing but the headline.
    pub fn is_empty(&self) -> bool {
        self.rendered_sources == 0
    }
}

fn render_source(out: &mut String, source: &Source, entry: &Entry, table: &PrizeTable) {
    let _ = writeln!(out, "📢 {} - {}", source.label, entry.title);
    for (location, lines) in table.iter() {
        if !location.is_empty() {
            let _ = writeln!(out, "{location}");
        }
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');
    }
}

/// Render in configured order, whatever order `results` arrive in.
/// Empty and failed sources leave no trace.
pub fn build_report(mut results: Vec<SourceResult>) -> Report {
    results.sort_by_key(|r| r.position);

    let mut text = String::new();
    let _ = writeln!(text, "{REPORT_HEADLINE}");
    text.push('\n');

    let mut rendered_sources = 0usize;
    for r in &results {
        if let SourceOutcome::Fetched { entry, table } = &r.outcome {
            render_source(&mut text, &r.source, entry, table);
            rendered_sources += 1;
        }
    }

    Report {
        text,
        rendered_sources,
    }
}
