//! Decision functions built on the point classifier.
//!
//! The free functions use the process-wide table from [`table::global`]; the
//! methods on [`ConfusableTable`] do the same work against an explicit table.

use crate::classify::{self, Points};
use crate::point::{Classification, Point};
use crate::table::{self, ConfusableTable};

impl ConfusableTable {
    /// Lazily classify `input`.
    pub fn points<'a>(&'a self, input: &'a str) -> Points<'a> {
        Points::new(self, input)
    }

    pub fn classify(&self, input: &str) -> Classification {
        classify::classify(self, input)
    }

    /// True if any point of `input` has a skeleton different from its text.
    /// Stops at the first such point.
    pub fn is_confusing(&self, input: &str) -> bool {
        self.points(input).any(|p| p.is_confusable())
    }

    /// The complete point-by-point breakdown of `input`.
    pub fn confusables(&self, input: &str) -> Classification {
        self.classify(input)
    }

    /// Replace every confusable point with its skeleton and drop invisible ones.
    pub fn rectify_confusion(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for point in self.points(input) {
            out.push_str(point.rendered());
        }
        out
    }

    /// Two different strings that rectify to the same skeleton.
    pub fn are_confusable(&self, a: &str, b: &str) -> bool {
        a != b && self.rectify_confusion(a) == self.rectify_confusion(b)
    }
}

/// Check whether `input` contains any visually confusable point.
pub fn is_confusing(input: &str) -> bool {
    table::global().is_confusing(input)
}

/// Classify `input` into points.
pub fn confusables(input: &str) -> Classification {
    table::global().confusables(input)
}

/// Convert a string to its skeleton form.
pub fn rectify_confusion(input: &str) -> String {
    table::global().rectify_confusion(input)
}

/// Alias of [`rectify_confusion`].
pub fn skeleton(input: &str) -> String {
    rectify_confusion(input)
}

/// Only the points of `input` that are confusable, in order.
pub fn confusable_points(input: &str) -> Vec<Point> {
    confusables(input)
        .into_iter()
        .filter(Point::is_confusable)
        .collect()
}

/// Check if two strings are confusable (different text, same skeleton).
pub fn are_confusable(a: &str, b: &str) -> bool {
    table::global().are_confusable(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_a() {
        assert!(is_confusing("p\u{0430}yp\u{0430}l"));
        assert_eq!(rectify_confusion("p\u{0430}yp\u{0430}l"), "paypal");
    }

    #[test]
    fn test_ascii_not_confusable() {
        assert!(!is_confusing("vitalik"));
        assert_eq!(rectify_confusion("vitalik"), "vitalik");
    }

    #[test]
    fn test_empty_string() {
        assert!(!is_confusing(""));
        assert!(confusables("").is_empty());
        assert_eq!(rectify_confusion(""), "");
    }

    #[test]
    fn test_skeleton() {
        // Cyrillic "ѕсоре" looks like Latin "scope"
        assert_eq!(skeleton("\u{0455}\u{0441}\u{043E}\u{0440}\u{0435}"), "scope");
    }

    #[test]
    fn test_zero_width_joiner_stripped() {
        let points = confusables("vita\u{200D}lik");
        assert_eq!(points[4].similar_to.as_deref(), Some(""));
        assert_eq!(rectify_confusion("vita\u{200D}lik"), "vitalik");
    }

    #[test]
    fn test_fraction_slash() {
        assert_eq!(rectify_confusion("a.eth\u{2044}b.eth"), "a.eth/b.eth");
    }

    #[test]
    fn test_confusable_points_only_flagged() {
        let points = confusable_points("fac\u{0435}book\u{200B}");
        assert_eq!(
            points,
            vec![
                Point::confusable("\u{0435}", "e"),
                Point::confusable("\u{200B}", ""),
            ]
        );
    }

    #[test]
    fn test_confusable_domain() {
        // "gіthub.com" with Cyrillic і
        assert!(are_confusable("g\u{0456}thub.com", "github.com"));
        assert!(!are_confusable("github.com", "github.com"));
        assert!(!are_confusable("gitlab.com", "github.com"));
    }

    #[test]
    fn test_rectify_idempotent_on_skeleton() {
        let once = rectify_confusion("\u{FF21}\u{FF50}\u{FF50}\u{2160}\u{0435}\u{0308}");
        assert_eq!(once, "AppI\u{00EB}");
        assert_eq!(rectify_confusion(&once), once);
    }

    #[test]
    fn test_table_methods_use_explicit_table() {
        let table = ConfusableTable::default();
        assert!(!table.is_confusing("p\u{0430}ypal"));
        assert_eq!(table.rectify_confusion("p\u{0430}ypal"), "p\u{0430}ypal");
    }
}
