use gap_domain::config::{GapConfig, LoggingConfig, ModsConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let mods = ModsConfig::default();
    assert_eq!(mods.directory, PathBuf::from("mods"));
    assert_eq!(mods.extension, "gapmod");
    assert!(mods.excluded.is_empty());
    assert!(!mods.recursive);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.directory.is_none());
}

#[test]
fn gap_config_deserializes_partial_documents() {
    let raw = json!({
        "mods": { "directory": "/opt/gap/mods", "excluded": ["broken", "legacy.gapmod"] },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: GapConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.mods.directory, PathBuf::from("/opt/gap/mods"));
    assert_eq!(cfg.mods.extension, "gapmod");
    assert_eq!(cfg.mods.excluded, vec!["broken".to_owned(), "legacy.gapmod".to_owned()]);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console);
}
