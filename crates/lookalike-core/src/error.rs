use std::path::PathBuf;

use thiserror::Error;

/// Failure to construct or install a confusable table.
///
/// Classification itself never fails; every error here happens while the
/// table is being built, before any query can be answered.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: expected `<source> ; <skeleton>`")]
    MissingSeparator { line: usize },
    #[error("line {line}: invalid codepoint `{token}`")]
    InvalidCodepoint { line: usize, token: String },
    #[error("entry {position}: empty source sequence")]
    EmptySource { position: usize },
    #[error("invalid table config: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("confusable table already initialized")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, TableError>;
