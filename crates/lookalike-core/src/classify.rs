//! Point classifier: a left-to-right, longest-match-first scan of the input.
//!
//! At each cursor position the table is asked for the longest source sequence
//! that prefixes the remaining input. A match consumes that many codepoints and
//! yields a confusable point, unless the skeleton is textually identical to the
//! consumed text. Without a match a single codepoint is consumed as a
//! canonical point. Every byte of the input lands in exactly one point.

use std::iter::FusedIterator;

use crate::point::{Classification, Point};
use crate::table::{ConfusableTable, Match};

/// Lazy classification of one input string.
pub struct Points<'a> {
    table: &'a ConfusableTable,
    rest: &'a str,
    /// Scratch buffer of candidate match boundaries.
    ends: Vec<usize>,
}

impl<'a> Points<'a> {
    pub fn new(table: &'a ConfusableTable, input: &'a str) -> Self {
        Self {
            table,
            rest: input,
            ends: Vec::with_capacity(table.max_source_len()),
        }
    }

    /// Input not yet classified.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }
}

impl Iterator for Points<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let first = self.rest.chars().next()?;
        let (consumed, point) = match self.table.match_at(self.rest, &mut self.ends) {
            Some(m) => (m.source.len(), point_for(m)),
            None => {
                let len = first.len_utf8();
                (len, Point::canonical(&self.rest[..len]))
            }
        };
        self.rest = &self.rest[consumed..];
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // At least one point while input remains, at most one per byte.
        (usize::from(!self.rest.is_empty()), Some(self.rest.len()))
    }
}

impl FusedIterator for Points<'_> {}

fn point_for(m: Match<'_, '_>) -> Point {
    if m.is_identity() {
        Point::canonical(m.source)
    } else {
        Point::confusable(m.source, m.skeleton)
    }
}

/// Classify `input` against `table` in one pass.
pub fn classify(table: &ConfusableTable, input: &str) -> Classification {
    Points::new(table, input).collect()
}
