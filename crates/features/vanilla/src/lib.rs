//! # Vanilla
//!
//! The mod every GAP installation ships with. Registers under the `gap`
//! project:
//!
//! | id                  | kind        |
//! |---------------------|-------------|
//! | `gap:white_noise`   | generator   |
//! | `gap:stripes`       | generator   |
//! | `gap:pixelize`      | transformer |
//! | `gap:color_reduce`  | transformer |
//!
//! Every generator carries the [`seed`] group, so a picture can be
//! reproduced from a number, a seed word or any text.

pub mod generators;
pub mod seed;
pub mod transformers;

use gap_kernel::KernelError;
use gap_kernel::mods::{Bundle, LinkedBundles, Mod, ModEntry};
use gap_kernel::registry::{Dispatcher, Registries};
use tracing::debug;

pub const PROJECT_ID: &str = "gap";
pub const DESCRIPTION: &str = "official vanilla GAP generators";

/// Entry point of the vanilla bundle.
#[derive(Debug, Default)]
pub struct Vanilla;

impl Mod for Vanilla {
    fn register(&self) -> &str {
        PROJECT_ID
    }

    fn info(&self) -> &str {
        DESCRIPTION
    }

    fn initialize(&self, registries: &Registries) -> Result<(), KernelError> {
        let generators = Dispatcher::new(&registries.generators, PROJECT_ID)?;
        for capability in generators::all() {
            let id = generators.register_type(&capability)?;
            debug!(%id, "generator ready");
        }

        let transformers = Dispatcher::new(&registries.transformers, PROJECT_ID)?;
        for capability in transformers::all() {
            let id = transformers.register_type(&capability)?;
            debug!(%id, "transformer ready");
        }
        Ok(())
    }
}

/// The vanilla bundle, ready for [`gap_kernel::mods::ModLoader::load_bundle`].
#[must_use]
pub fn bundle() -> Bundle {
    let bundle = Bundle::new(PROJECT_ID).with_mod(ModEntry::new("Vanilla", || Ok(Box::new(Vanilla))));
    let bundle = generators::all().into_iter().fold(bundle, Bundle::with_generator);
    transformers::all().into_iter().fold(bundle, Bundle::with_transformer)
}

/// Makes bundle manifests naming `entry = "gap"` resolve to [`bundle`].
#[must_use]
pub fn link(resolver: LinkedBundles) -> LinkedBundles {
    resolver.link(PROJECT_ID, bundle)
}
