//! # Kernel
//!
//! Runtime core shared by the facade and every mod:
//!
//! * [`capability`]: the generator and transformer traits plus the
//!   descriptors bundles use to expose implementations.
//! * [`registry`]: namespaced factories ([`registry::Registry`]) written
//!   through per-project [`registry::Dispatcher`]s.
//! * [`mods`]: bundle discovery and mod loading.
//! * [`config`]: layered TOML + environment loading.
//!
//! ```rust
//! use gap_kernel::mods::{LinkedBundles, ModLoader};
//! use gap_kernel::registry::Registries;
//! use gap_domain::config::ModsConfig;
//!
//! let mut loader = ModLoader::new(Registries::new(), LinkedBundles::new());
//! let report = loader.load_dir(&ModsConfig { directory: "no/such/dir".into(), ..Default::default() })?;
//! assert!(report.loaded.is_empty() && report.is_clean());
//! # Ok::<(), gap_kernel::KernelError>(())
//! ```

pub mod capability;
pub mod config;
mod error;
pub mod mods;
pub mod registry;

pub use error::{KernelError, KernelErrorExt};
pub use gap_domain as domain;
pub use gap_settings as settings;
