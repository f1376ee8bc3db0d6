//! Process-wide table installation. Kept in its own test binary because the
//! global table can only be initialized once per process.

use std::fs;

use tempfile::TempDir;

use lookalike_core::config::{self, CONFIG_ENV};
use lookalike_core::table;
use lookalike_core::{is_confusing, rectify_confusion, ConfusableTable, TableError};

#[test]
fn test_install_from_env_then_reject_second_install() {
    let tmp = TempDir::new().expect("create temp dir");
    fs::write(tmp.path().join("extra.txt"), "2C9F ; 006F\n").unwrap();
    let config_path = tmp.path().join("lookalike.yaml");
    fs::write(&config_path, "tables: [extra.txt]\n").unwrap();
    std::env::set_var(CONFIG_ENV, &config_path);

    let installed = config::install_from_env().unwrap();
    assert_eq!(installed.len(), ConfusableTable::builtin().len() + 1);
    assert!(std::ptr::eq(installed, table::global()));

    // Free functions now see both built-in and configured entries
    assert!(is_confusing("g\u{2C9F}\u{2C9F}gle"));
    assert_eq!(rectify_confusion("g\u{2C9F}\u{03BF}gle"), "google");

    let err = table::install(ConfusableTable::default()).unwrap_err();
    assert!(matches!(err, TableError::AlreadyInitialized));
    // The first table stays in place
    assert!(is_confusing("p\u{0430}ypal"));

    std::env::remove_var(CONFIG_ENV);
}
