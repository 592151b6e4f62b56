//! Mod bundles and their discovery.
//!
//! A bundle ships exactly one [`Mod`] entry plus the capability types it
//! implements. Loading a bundle either hands the registries to the mod
//! ([`Mod::initialize`]) or, for auto-loading mods, registers every
//! non-excluded capability type under `mod_id:type_id`.

mod loader;
mod resolver;

pub use loader::{BundleFailure, LoadReport, LoadStage, LoadedMod, ModLoader};
pub use resolver::{BundleResolver, LinkedBundles, Manifest};

use crate::capability::{CapabilityType, ImageGenerator, ImageTransformer};
use crate::error::KernelError;
use crate::registry::Registries;
use std::fmt;
use std::sync::Arc;

/// Entry point of a bundle.
pub trait Mod: Send + Sync {
    /// The mod id; doubles as the project namespace of its capabilities.
    fn register(&self) -> &str;

    /// One-line description shown in mod listings.
    fn info(&self) -> &str;

    /// Whether the loader registers the bundle's capability types itself.
    fn auto_load(&self) -> bool {
        false
    }

    /// Registers capabilities by hand. Only called when
    /// [`Mod::auto_load`] is `false`.
    fn initialize(&self, registries: &Registries) -> Result<(), KernelError>;
}

/// Builds the mod entry of a bundle; may fail.
pub type ModFactory = Arc<dyn Fn() -> Result<Box<dyn Mod>, KernelError> + Send + Sync>;

/// Named mod entry point inside a bundle.
#[derive(Clone)]
pub struct ModEntry {
    name: &'static str,
    factory: ModFactory,
}

impl ModEntry {
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Mod>, KernelError> + Send + Sync + 'static,
    {
        Self { name, factory: Arc::new(factory) }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn instantiate(&self) -> Result<Box<dyn Mod>, KernelError> {
        (self.factory)()
    }
}

impl fmt::Debug for ModEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModEntry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Everything one bundle contributes.
#[derive(Debug, Clone)]
pub struct Bundle {
    name: String,
    entries: Vec<ModEntry>,
    generators: Vec<CapabilityType<dyn ImageGenerator>>,
    transformers: Vec<CapabilityType<dyn ImageTransformer>>,
}

impl Bundle {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new(), generators: Vec::new(), transformers: Vec::new() }
    }

    #[must_use]
    pub fn with_mod(mut self, entry: ModEntry) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: CapabilityType<dyn ImageGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: CapabilityType<dyn ImageTransformer>) -> Self {
        self.transformers.push(transformer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ModEntry] {
        &self.entries
    }

    pub fn generators(&self) -> &[CapabilityType<dyn ImageGenerator>] {
        &self.generators
    }

    pub fn transformers(&self) -> &[CapabilityType<dyn ImageTransformer>] {
        &self.transformers
    }

    /// The single mod entry.
    ///
    /// # Errors
    /// [`KernelError::InvalidBundle`] for zero or several entries.
    pub fn entry(&self) -> Result<&ModEntry, KernelError> {
        match self.entries.as_slice() {
            [entry] => Ok(entry),
            [] => Err(KernelError::invalid_bundle(format!("bundle '{}' has no mod entry", self.name))),
            many => Err(KernelError::invalid_bundle(format!(
                "bundle '{}' has {} mod entries, expected one",
                self.name,
                many.len()
            ))),
        }
    }
}
