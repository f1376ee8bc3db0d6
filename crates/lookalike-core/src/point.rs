use serde::{Deserialize, Serialize};

/// One classified unit of an input string: a base codepoint, or a longer
/// sequence the table matched as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// The original text consumed from the input.
    pub text: String,
    /// Skeleton form, present only when it differs from `text`.
    /// An empty string marks an invisible sequence that rectification drops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_to: Option<String>,
}

/// Ordered points spanning the whole input. Concatenating every `text`
/// reproduces the input exactly.
pub type Classification = Vec<Point>;

impl Point {
    /// A point that already renders as itself.
    pub fn canonical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            similar_to: None,
        }
    }

    pub fn confusable(text: impl Into<String>, similar_to: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            similar_to: Some(similar_to.into()),
        }
    }

    pub fn is_confusable(&self) -> bool {
        self.similar_to.is_some()
    }

    /// True for invisible sequences whose skeleton is empty.
    pub fn is_deletion(&self) -> bool {
        self.similar_to.as_deref() == Some("")
    }

    /// The text this point contributes to a rectified string.
    pub fn rendered(&self) -> &str {
        self.similar_to.as_deref().unwrap_or(&self.text)
    }
}
