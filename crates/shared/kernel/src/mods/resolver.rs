use super::Bundle;
use crate::error::{KernelError, KernelErrorExt};
use fxhash::FxHashMap;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Turns a discovered bundle file into a [`Bundle`].
pub trait BundleResolver: Send + Sync {
    /// `Ok(None)` skips the file without counting it as a failure.
    fn resolve(&self, path: &Path) -> Result<Option<Bundle>, KernelError>;
}

/// Contents of a bundle file.
///
/// ```toml
/// entry = "gap"
/// enabled = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub entry: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl Manifest {
    /// # Errors
    /// [`KernelError::Io`] or [`KernelError::Manifest`].
    pub fn read(path: &Path) -> Result<Self, KernelError> {
        let text = std::fs::read_to_string(path).context(path.display().to_string())?;
        let manifest = toml::from_str::<Self>(&text).context(path.display().to_string())?;
        Ok(manifest)
    }
}

type BundleFn = Arc<dyn Fn() -> Bundle + Send + Sync>;

/// Resolves manifests to bundles compiled into the executable.
#[derive(Clone, Default)]
pub struct LinkedBundles {
    bundles: FxHashMap<String, BundleFn>,
}

impl LinkedBundles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `entry` resolvable; a later call with the same name replaces it.
    #[must_use]
    pub fn link<F>(mut self, entry: impl Into<String>, bundle: F) -> Self
    where
        F: Fn() -> Bundle + Send + Sync + 'static,
    {
        self.bundles.insert(entry.into(), Arc::new(bundle));
        self
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.bundles.contains_key(entry)
    }
}

impl BundleResolver for LinkedBundles {
    fn resolve(&self, path: &Path) -> Result<Option<Bundle>, KernelError> {
        let manifest = Manifest::read(path)?;
        if !manifest.enabled {
            return Ok(None);
        }
        let bundle = self.bundles.get(&manifest.entry).ok_or_else(|| {
            KernelError::not_found(format!(
                "'{}' names entry '{}', which is not linked",
                path.display(),
                manifest.entry
            ))
        })?;
        Ok(Some(bundle()))
    }
}

impl fmt::Debug for LinkedBundles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        entries.sort_unstable();
        f.debug_struct("LinkedBundles").field("entries", &entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifests_default_to_enabled() {
        let manifest: Manifest = toml::from_str("entry = \"gap\"").expect("valid manifest");
        assert_eq!(manifest, Manifest { entry: "gap".to_owned(), enabled: true });
    }

    #[test]
    fn unknown_manifest_keys_are_rejected() {
        assert!(toml::from_str::<Manifest>("entry = \"gap\"\nversion = 2").is_err());
    }

    #[test]
    fn disabled_manifests_resolve_to_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("off.gapmod");
        std::fs::write(&path, "entry = \"gap\"\nenabled = false").expect("write");

        let resolver = LinkedBundles::new().link("gap", || Bundle::new("gap"));
        assert!(resolver.resolve(&path).expect("readable").is_none());
    }

    #[test]
    fn unlinked_entries_are_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ghost.gapmod");
        std::fs::write(&path, "entry = \"ghost\"").expect("write");

        let err = LinkedBundles::new().resolve(&path).expect_err("nothing linked");
        assert!(matches!(err, KernelError::NotFound { .. }));
    }
}
