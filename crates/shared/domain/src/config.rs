use serde::Deserialize;
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    pub mods: ModsConfig,
    pub logging: LoggingConfig,
}

/// Where and how mod bundles are discovered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModsConfig {
    pub directory: PathBuf,
    /// File extension of bundle manifests, without the dot.
    pub extension: String,
    /// Bundle names skipped during discovery, with or without extension.
    pub excluded: Vec<String>,
    pub recursive: bool,
}

/// Subscriber settings handed to the logger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

impl Default for ModsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("mods"),
            extension: "gapmod".to_owned(),
            excluded: Vec::new(),
            recursive: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, directory: None, json: false, filter: None }
    }
}
