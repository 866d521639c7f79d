// src/extract.rs
//! Prize-text extraction: turns a feed description into an ordered
//! location -> prize lines table.
//!
//! Description convention:
//! - `[Label]` lines switch the current location,
//! - `G.` lines are prize tiers for the current location,
//! - everything else is dropped.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<br>`, `<br/>`, `<br />`, `<BR >` ... any case, any inner spacing.
static RE_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*br\s*/?\s*>").unwrap());

pub const PRIZE_PREFIX: &str = "G.";

/// Ordered mapping from location label to prize lines.
/// The empty label holds lines seen before any location marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrizeTable {
    groups: Vec<(String, Vec<String>)>,
}

impl PrizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.groups.iter().position(|(l, _)| l == label)
    }

    /// Register `label` if unseen; returns its index.
    pub fn ensure_location(&mut self, label: &str) -> usize {
        match self.position(label) {
            Some(i) => i,
            None => {
                self.groups.push((label.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        }
    }

    pub fn push_line(&mut self, label: &str, line: &str) {
        let i = self.ensure_location(label);
        self.groups[i].1.push(line.to_string());
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.position(label).map(|i| self.groups[i].1.as_slice())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(l, v)| (l.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn prize_count(&self) -> usize {
        self.groups.iter().map(|(_, v)| v.len()).sum()
    }
}

/// Replace every break-tag spelling with `\n`.
pub fn normalize_breaks(s: &str) -> String {
    RE_BR.replace_all(s, "\n").into_owned()
}

fn is_location_marker(line: &str) -> bool {
    line.starts_with('[') && line.contains(']')
}

fn is_prize_line(line: &str) -> bool {
    line.starts_with(PRIZE_PREFIX)
}

/// Parse one description. Pure; the same input always yields the same table.
pub fn extract_prizes(description: &str) -> PrizeTable {
    let normalized = normalize_breaks(description);
    let mut table = PrizeTable::new();
    let mut current = String::new();

    for line in normalized.lines().map(str::trim).filter(|l| !l.is_empty()) {
        // bracket check wins over prize check
        if is_location_marker(line) {
            current = line.to_string();
            table.ensure_location(&current);
            continue;
        }
        if is_prize_line(line) {
            table.push_line(&current, line);
        }
    }

    table
}
