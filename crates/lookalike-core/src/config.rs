use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::table::{self, ConfusableEntry, ConfusableTable};

/// Environment variable naming a YAML table config.
pub const CONFIG_ENV: &str = "LOOKALIKE_CONFIG";

/// Describes how the confusable table is assembled, loaded from YAML.
///
/// ```yaml
/// include_builtin: true
/// tables:
///   - extra_confusables.txt
/// entries:
///   - source: "ꙅ"
///     skeleton: "s"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Path this config was loaded from.
    #[serde(skip)]
    pub path: Option<String>,

    /// Start from the embedded table.
    pub include_builtin: bool,

    /// Extra table files in the line format, overlaid in order.
    /// Relative paths resolve against the config file's directory.
    pub tables: Vec<PathBuf>,

    /// Inline records, overlaid after the table files.
    pub entries: Vec<ConfusableEntry>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_builtin: true,
            tables: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Load a config file. Read and parse failures are returned, not
    /// replaced by defaults: a table that cannot be built cannot answer queries.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = table::read_file(path)?;
        let mut config: TableConfig = serde_yaml::from_str(&content)?;
        config.path = Some(path.display().to_string());
        debug!(
            path = %path.display(),
            tables = config.tables.len(),
            entries = config.entries.len(),
            "loaded table config"
        );
        Ok(config)
    }

    /// Load the config named by `LOOKALIKE_CONFIG`, if set.
    pub fn discover() -> Result<Option<Self>> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_from_path(Path::new(&path)).map(Some),
            _ => Ok(None),
        }
    }

    /// Assemble the table this config describes.
    pub fn build(&self) -> Result<ConfusableTable> {
        let mut table = if self.include_builtin {
            ConfusableTable::builtin()
        } else {
            ConfusableTable::default()
        };
        for file in &self.tables {
            let resolved = self.resolve(file);
            let entries = table::parse_entries(&table::read_file(&resolved)?)?;
            debug!(path = %resolved.display(), entries = entries.len(), "overlaying table file");
            table.overlay(entries)?;
        }
        table.overlay(self.entries.iter().cloned())?;
        Ok(table)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            return file.to_path_buf();
        }
        match self.path.as_deref().map(Path::new).and_then(Path::parent) {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }
}

/// Build the table from `LOOKALIKE_CONFIG` (or the embedded data when unset)
/// and install it process-wide. Call once at startup, before any query.
pub fn install_from_env() -> Result<&'static ConfusableTable> {
    let table = match TableConfig::discover()? {
        Some(config) => config.build()?,
        None => ConfusableTable::builtin(),
    };
    table::install(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    #[test]
    fn test_default_is_builtin() {
        let config = TableConfig::default();
        assert!(config.include_builtin);
        let table = config.build().unwrap();
        assert_eq!(table.len(), ConfusableTable::builtin().len());
    }

    #[test]
    fn test_yaml_inline_entries() {
        let config: TableConfig = serde_yaml::from_str(
            "include_builtin: false\nentries:\n  - source: \"\\u0501\"\n    skeleton: \"d\"\n",
        )
        .unwrap();
        let table = config.build().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rectify_confusion("\u{0501}og"), "dog");
    }

    #[test]
    fn test_yaml_defaults_when_fields_missing() {
        let config: TableConfig = serde_yaml::from_str("tables: []\n").unwrap();
        assert!(config.include_builtin);
        assert!(config.entries.is_empty());
    }

    #[test]
    fn test_inline_entry_overrides_builtin() {
        let config = TableConfig {
            entries: vec![ConfusableEntry::new("\u{200D}", "\u{200D}")],
            ..TableConfig::default()
        };
        let table = config.build().unwrap();
        // Identity entry: known but no longer confusable
        assert!(!table.is_confusing("a\u{200D}b"));
        assert!(table.is_confusing("\u{0430}"));
    }

    #[test]
    fn test_missing_table_file_is_an_error() {
        let config = TableConfig {
            tables: vec![PathBuf::from("/nonexistent/lookalike/extra.txt")],
            ..TableConfig::default()
        };
        assert!(matches!(config.build(), Err(TableError::Io { .. })));
    }

    #[test]
    fn test_relative_tables_resolve_against_config_dir() {
        let config = TableConfig {
            path: Some("/etc/lookalike/config.yaml".to_string()),
            ..TableConfig::default()
        };
        assert_eq!(
            config.resolve(Path::new("extra.txt")),
            PathBuf::from("/etc/lookalike/extra.txt")
        );
        assert_eq!(
            config.resolve(Path::new("/abs/extra.txt")),
            PathBuf::from("/abs/extra.txt")
        );
    }
}
