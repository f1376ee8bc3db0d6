//! The confusable table: an immutable map from source codepoint sequences to
//! their skeletons, consulted read-only by the classifier.
//!
//! Lookups are keyed on the string form of the source sequence. A source may
//! span several codepoints; [`ConfusableTable::longest_match`] tries the
//! longest candidate first so that a base letter plus a combining mark resolves
//! as one unit before the base letter alone is considered.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data;
use crate::error::{Result, TableError};

/// Process-wide table, set once and never torn down.
static GLOBAL: OnceCell<ConfusableTable> = OnceCell::new();

/// A `{ source, skeleton }` record. An empty skeleton deletes the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusableEntry {
    pub source: String,
    pub skeleton: String,
}

impl ConfusableEntry {
    pub fn new(source: impl Into<String>, skeleton: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            skeleton: skeleton.into(),
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.skeleton.is_empty()
    }
}

/// A source sequence matched at the head of the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a, 't> {
    /// The consumed input text.
    pub source: &'a str,
    pub skeleton: &'t str,
}

impl Match<'_, '_> {
    /// Entries whose skeleton equals their source are known but not confusable.
    pub fn is_identity(&self) -> bool {
        self.source == self.skeleton
    }
}

/// Read-only confusable mapping.
#[derive(Debug, Clone, Default)]
pub struct ConfusableTable {
    map: HashMap<Box<str>, Box<str>>,
    /// Single codepoints that map to the empty skeleton.
    invisible: HashSet<char>,
    /// Longest source, in codepoints.
    max_source_len: usize,
}

impl ConfusableTable {
    /// Build the table from the data compiled into the crate.
    pub fn builtin() -> Self {
        let mut table = Self {
            map: HashMap::with_capacity(data::CONFUSABLE_COUNT),
            ..Self::default()
        };
        for &(source, skeleton) in data::CONFUSABLE_TABLE {
            table.insert(source, skeleton);
        }
        debug!(
            entries = table.len(),
            max_source_len = table.max_source_len,
            "built embedded confusable table"
        );
        table
    }

    /// Build a table from `{ source, skeleton }` records.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfusableEntry>,
    {
        let mut table = Self::default();
        table.overlay(entries)?;
        debug!(
            entries = table.len(),
            max_source_len = table.max_source_len,
            "built confusable table from records"
        );
        Ok(table)
    }

    /// Parse table text in the `<source> ; <skeleton> # comment` line format.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_entries(parse_entries(text)?)
    }

    /// Read and parse a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::parse(&read_file(path)?)?;
        debug!(path = %path.display(), entries = table.len(), "loaded confusable table");
        Ok(table)
    }

    /// Add entries on top of the current ones. A source that is already
    /// present takes the new skeleton.
    pub fn overlay<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ConfusableEntry>,
    {
        for (idx, entry) in entries.into_iter().enumerate() {
            if entry.source.is_empty() {
                return Err(TableError::EmptySource { position: idx + 1 });
            }
            if let Some(previous) = self.insert(&entry.source, &entry.skeleton) {
                if &*previous != entry.skeleton.as_str() {
                    warn!(
                        source = %entry.source.escape_unicode(),
                        previous = %previous.escape_unicode(),
                        skeleton = %entry.skeleton.escape_unicode(),
                        "confusable entry replaced"
                    );
                }
            }
        }
        if let Some((source, skeleton)) = self.closure_violation() {
            warn!(
                source = %source.escape_unicode(),
                skeleton = %skeleton.escape_unicode(),
                "confusable table is not closed; rectification may not be idempotent"
            );
        }
        Ok(())
    }

    /// An entry that lets rectified output form a new match: its skeleton
    /// contains a codepoint that starts a non-identity source, or it is a
    /// sequence whose first codepoint has no entry of its own. `None` means
    /// rectifying twice gives the same result as rectifying once.
    pub fn closure_violation(&self) -> Option<(&str, &str)> {
        let starts: HashSet<char> = self
            .map
            .iter()
            .filter(|(source, skeleton)| source != skeleton)
            .filter_map(|(source, _)| source.chars().next())
            .collect();
        self.map.iter().find_map(|(source, skeleton)| {
            if source == skeleton {
                return None;
            }
            let mut chars = source.chars();
            let first = chars.next()?;
            let mut buf = [0u8; 4];
            let unanchored =
                chars.next().is_some() && !self.map.contains_key(&*first.encode_utf8(&mut buf));
            let feeds_match = skeleton.chars().any(|c| starts.contains(&c));
            (unanchored || feeds_match).then_some((&**source, &**skeleton))
        })
    }

    fn insert(&mut self, source: &str, skeleton: &str) -> Option<Box<str>> {
        let mut chars = source.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if skeleton.is_empty() {
                self.invisible.insert(ch);
            } else {
                self.invisible.remove(&ch);
            }
        }
        self.max_source_len = self.max_source_len.max(source.chars().count());
        self.map.insert(source.into(), skeleton.into())
    }

    /// Longest entry whose source is a prefix of `rest`.
    pub fn longest_match<'a>(&self, rest: &'a str) -> Option<Match<'a, '_>> {
        let mut ends = Vec::with_capacity(self.max_source_len);
        self.match_at(rest, &mut ends)
    }

    /// Same as [`longest_match`](Self::longest_match), reusing `ends` as
    /// scratch space for candidate boundaries.
    pub(crate) fn match_at<'a>(
        &self,
        rest: &'a str,
        ends: &mut Vec<usize>,
    ) -> Option<Match<'a, '_>> {
        ends.clear();
        ends.extend(
            rest.char_indices()
                .take(self.max_source_len)
                .map(|(i, c)| i + c.len_utf8()),
        );
        ends.iter().rev().find_map(|&end| {
            let source = &rest[..end];
            self.map.get(source).map(|skeleton| Match {
                source,
                skeleton: &**skeleton,
            })
        })
    }

    /// Exact lookup of a source sequence.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.map.get(source).map(|s| &**s)
    }

    /// True when `ch` on its own is dropped by rectification.
    pub fn is_invisible(&self, ch: char) -> bool {
        self.invisible.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn max_source_len(&self) -> usize {
        self.max_source_len
    }

    /// All `(source, skeleton)` pairs, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (&**k, &**v))
    }
}

/// Parse the line format into records without building a table.
pub fn parse_entries(text: &str) -> Result<Vec<ConfusableEntry>> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let mut fields = content.split(';');
        let (source, skeleton) = match (fields.next(), fields.next()) {
            (Some(source), Some(skeleton)) => (source, skeleton),
            _ => return Err(TableError::MissingSeparator { line }),
        };
        let source = decode_codepoints(source, line)?;
        if source.is_empty() {
            return Err(TableError::EmptySource { position: line });
        }
        let skeleton = decode_codepoints(skeleton, line)?;
        entries.push(ConfusableEntry { source, skeleton });
    }
    Ok(entries)
}

fn decode_codepoints(field: &str, line: usize) -> Result<String> {
    field
        .split_whitespace()
        .map(|token| {
            u32::from_str_radix(token, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| TableError::InvalidCodepoint {
                    line,
                    token: token.to_string(),
                })
        })
        .collect()
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The process-wide table. Built from the embedded data on first use unless
/// [`install`] ran earlier.
pub fn global() -> &'static ConfusableTable {
    GLOBAL.get_or_init(ConfusableTable::builtin)
}

/// Install `table` as the process-wide table. Fails once the global table has
/// been initialized, either by an earlier install or by first use.
pub fn install(table: ConfusableTable) -> Result<&'static ConfusableTable> {
    let entries = table.len();
    GLOBAL
        .set(table)
        .map_err(|_| TableError::AlreadyInitialized)?;
    debug!(entries, "installed process-wide confusable table");
    Ok(global())
}
