use super::{ProjectId, Registry};
use crate::capability::CapabilityType;
use crate::error::{KernelError, KernelErrorExt};
use gap_domain::naming::qualified_id;
use std::fmt;
use std::sync::Arc;

/// Write access to one project namespace of a [`Registry`].
///
/// A project can be claimed once per registry; every id written through the
/// dispatcher is `project:item`.
pub struct Dispatcher<C: ?Sized> {
    project: ProjectId,
    registry: Registry<C>,
}

impl<C: ?Sized + 'static> Dispatcher<C> {
    /// # Errors
    /// [`KernelError::InvalidId`] for a malformed project,
    /// [`KernelError::DuplicateProject`] when another dispatcher already owns
    /// it on `registry`.
    pub fn new(registry: &Registry<C>, project: &str) -> Result<Self, KernelError> {
        let project = ProjectId::try_from(project)?;
        if !registry.claim(project.as_str()) {
            return Err(KernelError::duplicate_project(format!(
                "project '{project}' already has a {} dispatcher",
                registry.kind()
            )));
        }
        Ok(Self { project, registry: registry.clone() })
    }

    /// Registers `factory` as `project:item`.
    ///
    /// # Errors
    /// [`KernelError::InvalidId`] for a malformed item,
    /// [`KernelError::DuplicateId`] when the id is taken.
    pub fn register<F>(&self, item: &str, factory: F) -> Result<(), KernelError>
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        ProjectId::validate(item, "item id")?;
        self.registry.insert(qualified_id(self.project.as_str(), item), Arc::new(factory))
    }

    /// Registers `capability` under the id derived from its type name.
    ///
    /// # Errors
    /// [`KernelError::InvalidCapability`] when the type has no zero-argument
    /// constructor, otherwise as [`Dispatcher::register`].
    pub fn register_type(&self, capability: &CapabilityType<C>) -> Result<String, KernelError> {
        let Some(constructor) = capability.constructor() else {
            return Err(KernelError::invalid_capability(format!(
                "{} '{}' has no zero-argument constructor",
                self.registry.kind(),
                capability.type_name()
            )));
        };
        let item = capability.item_id();
        ProjectId::validate(&item, "item id").context(capability.type_name())?;
        let id = qualified_id(self.project.as_str(), &item);
        self.registry.insert(id.clone(), Arc::clone(constructor))?;
        Ok(id)
    }

    pub const fn project(&self) -> &ProjectId {
        &self.project
    }

    pub const fn registry(&self) -> &Registry<C> {
        &self.registry
    }
}

impl<C: ?Sized> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").field("project", &self.project).field("registry", &self.registry).finish()
    }
}
