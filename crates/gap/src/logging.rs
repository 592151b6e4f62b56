use crate::GapError;
use gap_domain::config::LoggingConfig;
use gap_logger::{LevelFilter, Logger};

/// Name of the application; prefixes every log file.
pub const APP_NAME: &str = "gap";

/// Installs the global subscriber described by `config`.
///
/// # Errors
/// [`GapError::InvalidConfiguration`] for an unknown level, otherwise
/// whatever the logger reports.
pub fn init_logging(config: &LoggingConfig) -> Result<Logger, GapError> {
    let level = config.level.parse::<LevelFilter>().map_err(|e| GapError::InvalidConfiguration {
        message: format!("log level '{}': {e}", config.level).into(),
        context: None,
    })?;

    let mut builder = Logger::builder().name(APP_NAME).level(level).console(config.console);
    if let Some(filter) = &config.filter {
        builder = builder.filter(filter.as_str());
    }

    let logger = match &config.directory {
        Some(directory) if config.json => builder.directory(directory).json().init(),
        Some(directory) => builder.directory(directory).init(),
        None => builder.init(),
    }?;
    Ok(logger)
}
