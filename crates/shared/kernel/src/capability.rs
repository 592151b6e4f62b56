//! The two capability kinds and the descriptors bundles use to expose them.

use crate::registry::Factory;
use gap_domain::image::Image;
use gap_domain::naming::code_name_to_id;
use gap_settings::{Builder, SettingsError};
use std::fmt;
use std::sync::Arc;

/// Produces an image from nothing but its own configuration.
pub trait ImageGenerator: Send + Sync {
    fn generate(&self) -> Image;

    /// Template describing how to build a configured generator of this kind.
    ///
    /// The returned builder is a fresh copy the caller may fill in.
    fn settings(&self) -> Result<Builder<Box<dyn ImageGenerator>>, SettingsError>;
}

/// Turns one image into another.
pub trait ImageTransformer: Send + Sync {
    fn transform(&self, image: &Image) -> Image;

    fn settings(&self) -> Result<Builder<Box<dyn ImageTransformer>>, SettingsError>;
}

/// Boxes a concrete capability as its trait object `C`.
pub trait IntoCapability<C: ?Sized> {
    fn into_capability(self) -> Box<C>;
}

impl<T: ImageGenerator + 'static> IntoCapability<dyn ImageGenerator> for T {
    fn into_capability(self) -> Box<dyn ImageGenerator> {
        Box::new(self)
    }
}

impl<T: ImageTransformer + 'static> IntoCapability<dyn ImageTransformer> for T {
    fn into_capability(self) -> Box<dyn ImageTransformer> {
        Box::new(self)
    }
}

/// One capability implementation shipped by a bundle.
///
/// Carries the type name (the source of its registry id), an optional
/// zero-argument constructor and the exclusion flag honoured by auto-loading.
pub struct CapabilityType<C: ?Sized> {
    type_name: &'static str,
    constructor: Option<Factory<C>>,
    excluded: bool,
}

impl<C: ?Sized + 'static> CapabilityType<C> {
    /// Describes `T` under `type_name`, constructed through its `Default`
    /// impl.
    ///
    /// The name is the source of the registry item id (`WhiteNoise` becomes
    /// `white_noise`), so it must not change once published.
    #[must_use]
    pub fn of<T>(type_name: &'static str) -> Self
    where
        T: Default + IntoCapability<C> + 'static,
    {
        Self {
            type_name,
            constructor: Some(Arc::new(|| T::default().into_capability())),
            excluded: false,
        }
    }

    #[must_use]
    pub fn with_constructor<F>(type_name: &'static str, constructor: F) -> Self
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        Self { type_name, constructor: Some(Arc::new(constructor)), excluded: false }
    }

    /// A type that needs arguments to be built; registering it fails.
    #[must_use]
    pub const fn without_default(type_name: &'static str) -> Self {
        Self { type_name, constructor: None, excluded: false }
    }

    /// Hides the type from auto-loading.
    #[must_use]
    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

impl<C: ?Sized> CapabilityType<C> {
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `WhiteNoise` → `white_noise`.
    pub fn item_id(&self) -> String {
        code_name_to_id(self.type_name)
    }

    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub(crate) const fn constructor(&self) -> Option<&Factory<C>> {
        self.constructor.as_ref()
    }
}

impl<C: ?Sized> Clone for CapabilityType<C> {
    fn clone(&self) -> Self {
        Self { type_name: self.type_name, constructor: self.constructor.clone(), excluded: self.excluded }
    }
}

impl<C: ?Sized> fmt::Debug for CapabilityType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityType")
            .field("type_name", &self.type_name)
            .field("has_constructor", &self.constructor.is_some())
            .field("excluded", &self.excluded)
            .finish()
    }
}
