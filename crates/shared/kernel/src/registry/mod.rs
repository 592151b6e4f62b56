//! Namespaced factories for every capability kind.
//!
//! A [`Registry`] maps `project:item` ids to zero-argument factories. It only
//! grows: entries are never replaced or removed. Writers go through a
//! [`Dispatcher`], which owns one project namespace.
//!
//! ```rust
//! use gap_kernel::registry::{Dispatcher, Registry};
//!
//! let registry: Registry<dyn Fn() -> u8 + Send + Sync> = Registry::new("counter");
//! let demo = Dispatcher::new(&registry, "demo")?;
//! demo.register("seven", || Box::new(|| 7))?;
//!
//! let seven = registry.instantiate("demo:seven")?;
//! assert_eq!(seven(), 7);
//! # Ok::<(), gap_kernel::KernelError>(())
//! ```

mod dispatcher;
mod project;

pub use dispatcher::Dispatcher;
pub use project::ProjectId;

use crate::capability::{ImageGenerator, ImageTransformer};
use crate::error::KernelError;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a fresh capability instance on every call.
pub type Factory<C> = Arc<dyn Fn() -> Box<C> + Send + Sync>;

struct Inner<C: ?Sized> {
    entries: FxHashMap<String, Factory<C>>,
    projects: FxHashSet<String>,
}

/// Shared handle over one capability kind's factories.
///
/// Clones point at the same table.
pub struct Registry<C: ?Sized> {
    kind: &'static str,
    inner: Arc<RwLock<Inner<C>>>,
}

impl<C: ?Sized + 'static> Registry<C> {
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            inner: Arc::new(RwLock::new(Inner {
                entries: FxHashMap::default(),
                projects: FxHashSet::default(),
            })),
        }
    }

    /// Adds `factory` under the fully qualified `id`.
    ///
    /// Prefer [`Dispatcher::register`], which builds the id.
    ///
    /// # Errors
    /// [`KernelError::DuplicateId`] when `id` is taken; the existing factory
    /// stays.
    pub fn register<F>(&self, id: impl Into<String>, factory: F) -> Result<(), KernelError>
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        self.insert(id.into(), Arc::new(factory))
    }

    pub(crate) fn insert(&self, id: String, factory: Factory<C>) -> Result<(), KernelError> {
        let mut inner = self.inner.write();
        if inner.entries.contains_key(&id) {
            return Err(KernelError::duplicate_id(format!("{} '{id}' is already registered", self.kind)));
        }
        debug!(kind = self.kind, %id, "registered");
        inner.entries.insert(id, factory);
        Ok(())
    }

    /// # Errors
    /// [`KernelError::NotFound`] for an unknown id.
    pub fn get(&self, id: &str) -> Result<Factory<C>, KernelError> {
        self.inner
            .read()
            .entries
            .get(id)
            .cloned()
            .ok_or_else(|| KernelError::not_found(format!("no {} registered as '{id}'", self.kind)))
    }

    /// Looks up `id` and runs its factory.
    ///
    /// # Errors
    /// As [`Registry::get`].
    pub fn instantiate(&self, id: &str) -> Result<Box<C>, KernelError> {
        // The lock is released before the factory runs.
        let factory = self.get(id)?;
        Ok(factory())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().entries.contains_key(id)
    }

    /// Every registered id, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.read().entries.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Marks `project` as owned. Returns `false` when it already was.
    fn claim(&self, project: &str) -> bool {
        self.inner.write().projects.insert(project.to_owned())
    }
}

impl<C: ?Sized> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self { kind: self.kind, inner: Arc::clone(&self.inner) }
    }
}

impl<C: ?Sized> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("entries", &inner.entries.len())
            .field("projects", &inner.projects)
            .finish()
    }
}

/// One registry per capability kind, handed to every mod.
#[derive(Debug, Clone)]
pub struct Registries {
    pub generators: Registry<dyn ImageGenerator>,
    pub transformers: Registry<dyn ImageTransformer>,
}

impl Registries {
    #[must_use]
    pub fn new() -> Self {
        Self { generators: Registry::new("generator"), transformers: Registry::new("transformer") }
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
