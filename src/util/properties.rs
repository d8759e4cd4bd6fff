//! Reader for `gradle.properties` style files.
//!
//! Supports `key=value`, `key: value` and `key value` lines, `#` and `!`
//! comments, trailing-backslash continuations and backslash escapes in
//! values. Unicode escapes are not decoded.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::util::fs;

/// Parsed properties, last definition wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn parse(contents: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut pending = String::new();

        for raw in contents.lines() {
            let line = raw.trim_start();
            if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
                continue;
            }

            if continues(line) {
                pending.push_str(&line[..line.len() - 1]);
                continue;
            }
            pending.push_str(line);

            let (key, value) = split_entry(&pending);
            if !key.is_empty() {
                entries.insert(key.to_string(), unescape(value));
            }
            pending.clear();
        }

        if !pending.is_empty() {
            let (key, value) = split_entry(&pending);
            if !key.is_empty() {
                entries.insert(key.to_string(), unescape(value));
            }
        }

        Properties { entries }
    }

    /// Read a properties file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Read a properties file if it exists.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An odd number of trailing backslashes continues the line; an even
/// number is a run of escaped backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn split_entry(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()) {
        Some(idx) => {
            let key = line[..idx].trim_end();
            let rest = line[idx..].trim_start();
            let rest = rest
                .strip_prefix('=')
                .or_else(|| rest.strip_prefix(':'))
                .unwrap_or(rest);
            (key, rest.trim_start())
        }
        None => (line, ""),
    }
}
