//! Facade crate for GAP.
//! Wires configuration, logging and mod loading together and builds
//! configured generators and transformers from their settings.
//! Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Load a [`GapConfig`] with [`load_config`] (or build one by hand).
//! - Call [`init_logging`] once per process and keep the returned handle.
//! - [`Gap::bootstrap`] scans the mod directory and always ends up with the
//!   vanilla `gap` mod loaded.
//! - [`Gap::configure_generator`] fills a settings builder and runs one of
//!   its nodes.
//!
//! ```rust
//! use gap::Gap;
//! use gap::domain::config::{GapConfig, ModsConfig};
//!
//! let config = GapConfig {
//!     mods: ModsConfig { directory: "no/mods/here".into(), ..ModsConfig::default() },
//!     ..GapConfig::default()
//! };
//! let gap = Gap::bootstrap(&config)?;
//! assert!(gap.generator_ids().contains(&"gap:white_noise".to_owned()));
//! # Ok::<(), gap::GapError>(())
//! ```

mod error;
mod logging;

pub use error::{GapError, GapErrorExt};
pub use gap_domain as domain;
pub use gap_domain::config::GapConfig;
pub use gap_kernel as kernel;
pub use gap_kernel::config::load_config;
pub use gap_logger::Logger;
pub use gap_settings as settings;
pub use gap_vanilla as vanilla;
pub use logging::{APP_NAME, init_logging};

use gap_kernel::capability::{ImageGenerator, ImageTransformer};
use gap_kernel::mods::{LinkedBundles, LoadReport, LoadedMod, ModLoader};
use gap_kernel::registry::Registries;
use gap_settings::{Builder, SettingsError};
use tracing::{info, warn};

/// Loaded mods and the registries they filled.
#[derive(Debug)]
pub struct Gap {
    loader: ModLoader,
    report: LoadReport,
}

impl Gap {
    /// Loads every bundle under `config.mods` that resolves to a linked
    /// entry, then the vanilla mod unless a manifest already loaded it.
    ///
    /// Broken bundles are skipped and listed in [`Gap::report`].
    ///
    /// # Errors
    /// Only when the mod directory exists but cannot be scanned.
    pub fn bootstrap(config: &GapConfig) -> Result<Self, GapError> {
        Self::bootstrap_with(config, LinkedBundles::new())
    }

    /// [`Gap::bootstrap`] with extra bundles the manifests may name.
    pub fn bootstrap_with(config: &GapConfig, bundles: LinkedBundles) -> Result<Self, GapError> {
        let mut loader = ModLoader::new(Registries::new(), gap_vanilla::link(bundles));
        let mut report = loader.load_dir(&config.mods).context("scanning mod directory")?;

        if !loader.is_loaded(gap_vanilla::PROJECT_ID) {
            match loader.load_bundle(&gap_vanilla::bundle()) {
                Ok(id) => report.loaded.push(id),
                Err(failure) => report.failures.push(failure),
            }
        }

        if report.is_clean() {
            info!(mods = report.loaded.len(), "mods loaded");
        } else {
            warn!(mods = report.loaded.len(), failures = report.failures.len(), "mods loaded with failures");
        }
        Ok(Self { loader, report })
    }

    pub const fn registries(&self) -> &Registries {
        self.loader.registries()
    }

    pub fn mods(&self) -> &[LoadedMod] {
        self.loader.mods()
    }

    pub const fn report(&self) -> &LoadReport {
        &self.report
    }

    /// A default-configured generator; call `settings()` on it for a builder.
    ///
    /// # Errors
    /// [`GapError::Kernel`] when nothing is registered under `id`.
    pub fn generator(&self, id: &str) -> Result<Box<dyn ImageGenerator>, GapError> {
        Ok(self.registries().generators.instantiate(id)?)
    }

    /// # Errors
    /// [`GapError::Kernel`] when nothing is registered under `id`.
    pub fn transformer(&self, id: &str) -> Result<Box<dyn ImageTransformer>, GapError> {
        Ok(self.registries().transformers.instantiate(id)?)
    }

    /// Fetches the settings of `id`, lets `fill` set values on the working
    /// copy, then runs `node` with the `(group, option)` selections.
    ///
    /// # Errors
    /// [`GapError::Kernel`] for an unknown id, [`GapError::Settings`] when a
    /// value is rejected or the node cannot be executed.
    pub fn configure_generator<F>(
        &self,
        id: &str,
        node: &str,
        selections: &[(&str, &str)],
        fill: F,
    ) -> Result<Box<dyn ImageGenerator>, GapError>
    where
        F: FnOnce(&mut Builder<Box<dyn ImageGenerator>>) -> Result<(), SettingsError>,
    {
        let mut builder = self.generator(id)?.settings().context(format!("settings of '{id}'"))?;
        fill(&mut builder).context(format!("configuring '{id}'"))?;
        builder.execute(node, selections).context(format!("building '{id}'"))
    }

    /// [`Gap::configure_generator`] for transformers.
    ///
    /// # Errors
    /// As [`Gap::configure_generator`].
    pub fn configure_transformer<F>(
        &self,
        id: &str,
        node: &str,
        selections: &[(&str, &str)],
        fill: F,
    ) -> Result<Box<dyn ImageTransformer>, GapError>
    where
        F: FnOnce(&mut Builder<Box<dyn ImageTransformer>>) -> Result<(), SettingsError>,
    {
        let mut builder = self.transformer(id)?.settings().context(format!("settings of '{id}'"))?;
        fill(&mut builder).context(format!("configuring '{id}'"))?;
        builder.execute(node, selections).context(format!("building '{id}'"))
    }

    pub fn generator_ids(&self) -> Vec<String> {
        self.registries().generators.ids()
    }

    pub fn transformer_ids(&self) -> Vec<String> {
        self.registries().transformers.ids()
    }
}
