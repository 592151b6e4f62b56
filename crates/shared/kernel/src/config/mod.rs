use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `GAP__MODS__DIRECTORY`.
pub const ENV_PREFIX: &str = "GAP";

#[gap_derive::gap_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a TOML file overlaid with `GAP__`-prefixed environment
/// variables.
///
/// 1. **Base file**: `path`, or `gap` (any supported extension) in the
///    working directory when `None`. With `required = false` a missing file
///    yields the serde defaults of `T`.
/// 2. **Environment**: nested keys use double underscores, so
///    `GAP__LOGGING__LEVEL=debug` sets `logging.level`.
///
/// # Errors
/// A missing required file, malformed TOML or values that do not fit `T`.
///
/// # Example
/// ```rust
/// use gap_kernel::config::load_config;
/// use gap_domain::config::GapConfig;
///
/// let cfg: GapConfig = load_config(Some("does/not/exist"), false)?;
/// assert_eq!(cfg.mods.extension, "gapmod");
/// # Ok::<(), gap_kernel::config::ConfigError>(())
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>, required: bool) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("gap"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
