use super::resolver::{BundleResolver, LinkedBundles};
use super::{Bundle, Mod};
use crate::error::KernelError;
use crate::registry::{Dispatcher, ProjectId, Registries};
use gap_domain::config::ModsConfig;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Where a bundle was when it failed. A bundle that gets past
/// `Registering` shows up as a [`LoadedMod`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LoadStage {
    Discovering,
    Instantiating,
    Registering,
}

/// A mod that made it through every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMod {
    pub id: String,
    pub description: String,
    pub bundle: String,
}

#[derive(Debug)]
pub struct BundleFailure {
    pub bundle: String,
    pub stage: LoadStage,
    pub error: KernelError,
}

impl fmt::Display for BundleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bundle '{}' failed while {}: {}", self.bundle, self.stage, self.error)
    }
}

/// Outcome of one directory scan.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Mod ids, in load order.
    pub loaded: Vec<String>,
    /// Bundle files switched off in their manifest.
    pub disabled: Vec<PathBuf>,
    pub failures: Vec<BundleFailure>,
}

impl LoadReport {
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Discovers bundles and registers their mods into shared [`Registries`].
///
/// Bundles load one at a time. A failing bundle is reported and skipped;
/// whatever it registered before failing stays registered.
pub struct ModLoader<R = LinkedBundles> {
    registries: Registries,
    resolver: R,
    mods: Vec<LoadedMod>,
}

impl<R: BundleResolver> ModLoader<R> {
    pub const fn new(registries: Registries, resolver: R) -> Self {
        Self { registries, resolver, mods: Vec::new() }
    }

    pub const fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn mods(&self) -> &[LoadedMod] {
        &self.mods
    }

    pub fn is_loaded(&self, mod_id: &str) -> bool {
        self.mods.iter().any(|m| m.id == mod_id)
    }

    /// Bundle files under `config.directory`, sorted by name.
    ///
    /// A missing directory holds no bundles.
    ///
    /// # Errors
    /// [`KernelError::Discovery`] when the directory cannot be read.
    pub fn discover(config: &ModsConfig) -> Result<Vec<PathBuf>, KernelError> {
        let root = config.directory.as_path();
        if !root.exists() {
            info!(directory = %root.display(), "mod directory does not exist, nothing to load");
            return Ok(Vec::new());
        }

        let depth = if config.recursive { usize::MAX } else { 1 };
        let mut found = Vec::new();
        for entry in WalkDir::new(root).max_depth(depth).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(&config.extension)) {
                continue;
            }
            if is_excluded(root, path, config) {
                debug!(bundle = %path.display(), "excluded");
                continue;
            }
            found.push(path.to_path_buf());
        }
        Ok(found)
    }

    /// Discovers and loads every bundle in `config.directory`.
    ///
    /// # Errors
    /// Only when the directory itself cannot be scanned; per-bundle
    /// failures land in the report.
    pub fn load_dir(&mut self, config: &ModsConfig) -> Result<LoadReport, KernelError> {
        let mut report = LoadReport::default();
        for path in Self::discover(config)? {
            let name = bundle_name(&path);
            let bundle = match self.resolver.resolve(&path) {
                Ok(Some(bundle)) => bundle,
                Ok(None) => {
                    info!(bundle = %name, "disabled in its manifest");
                    report.disabled.push(path);
                    continue;
                },
                Err(error) => {
                    report.failures.push(self.failed(name, LoadStage::Discovering, error));
                    continue;
                },
            };
            match self.load_bundle(&bundle) {
                Ok(id) => report.loaded.push(id),
                Err(failure) => report.failures.push(failure),
            }
        }
        Ok(report)
    }

    /// Loads one in-process bundle.
    ///
    /// # Errors
    /// A [`BundleFailure`] naming the stage that failed.
    pub fn load_bundle(&mut self, bundle: &Bundle) -> Result<String, BundleFailure> {
        let name = bundle.name().to_owned();
        let entry = match bundle.entry().and_then(super::ModEntry::instantiate) {
            Ok(entry) => entry,
            Err(error) => return Err(self.failed(name, LoadStage::Instantiating, error)),
        };
        let id = match self.register(bundle, entry.as_ref()) {
            Ok(id) => id,
            Err(error) => return Err(self.failed(name, LoadStage::Registering, error)),
        };

        info!(mod_id = %id, bundle = %name, "{}", entry.info());
        self.mods.push(LoadedMod { id: id.clone(), description: entry.info().to_owned(), bundle: name });
        Ok(id)
    }

    fn register(&self, bundle: &Bundle, entry: &dyn Mod) -> Result<String, KernelError> {
        let id = ProjectId::try_from(entry.register())?;
        if self.is_loaded(id.as_str()) {
            return Err(KernelError::duplicate_mod(format!("mod '{id}' is already loaded")));
        }

        if entry.auto_load() {
            let generators = Dispatcher::new(&self.registries.generators, id.as_str())?;
            for capability in bundle.generators().iter().filter(|c| !c.is_excluded()) {
                generators.register_type(capability)?;
            }
            let transformers = Dispatcher::new(&self.registries.transformers, id.as_str())?;
            for capability in bundle.transformers().iter().filter(|c| !c.is_excluded()) {
                transformers.register_type(capability)?;
            }
        } else {
            entry.initialize(&self.registries)?;
        }
        Ok(id.to_string())
    }

    fn failed(&self, bundle: String, stage: LoadStage, error: KernelError) -> BundleFailure {
        let failure = BundleFailure { bundle, stage, error };
        warn!(loaded = self.mods.len(), "{failure}");
        failure
    }
}

impl<R> fmt::Debug for ModLoader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModLoader")
            .field("registries", &self.registries)
            .field("mods", &self.mods)
            .finish_non_exhaustive()
    }
}

fn bundle_name(path: &Path) -> String {
    path.file_stem().map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// `broken`, `broken.gapmod` and `sub/broken.gapmod` all exclude
/// `<dir>/sub/broken.gapmod` when given relative to the mod directory.
fn is_excluded(root: &Path, path: &Path, config: &ModsConfig) -> bool {
    let file_name = path.file_name().and_then(OsStr::to_str);
    let stem = path.file_stem().and_then(OsStr::to_str);
    config.excluded.iter().any(|excluded| {
        let with_extension = format!("{excluded}.{}", config.extension);
        file_name == Some(excluded.as_str())
            || stem == Some(excluded.as_str())
            || path == root.join(excluded)
            || path == root.join(&with_extension)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(root: &Path, excluded: &[&str]) -> ModsConfig {
        ModsConfig {
            directory: root.to_path_buf(),
            excluded: excluded.iter().map(|s| (*s).to_owned()).collect(),
            ..ModsConfig::default()
        }
    }

    #[test]
    fn failures_name_their_stage() {
        let failure = BundleFailure {
            bundle: "broken".to_owned(),
            stage: LoadStage::Instantiating,
            error: KernelError::invalid_bundle("bundle 'broken' has no mod entry"),
        };
        assert_eq!(
            failure.to_string(),
            "bundle 'broken' failed while instantiating: Invalid bundle: bundle 'broken' has no mod entry"
        );
    }

    #[test]
    fn missing_directories_hold_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = config(&dir.path().join("absent"), &[]);
        assert!(ModLoader::<LinkedBundles>::discover(&cfg).expect("no scan error").is_empty());
    }

    #[test]
    fn exclusions_match_name_extension_and_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir(dir.path().join("nested")).expect("mkdir");
        for file in ["a.gapmod", "b.gapmod", "c.gapmod", "d.gapmod", "notes.txt", "nested/e.gapmod"] {
            std::fs::write(dir.path().join(file), "entry = \"x\"").expect("write");
        }

        let mut cfg = config(dir.path(), &["a", "b.gapmod", "nested/e"]);
        let found = ModLoader::<LinkedBundles>::discover(&cfg).expect("scan");
        let names: Vec<String> = found.iter().map(|p| bundle_name(p)).collect();
        assert_eq!(names, ["c", "d"]);

        cfg.recursive = true;
        cfg.excluded = vec!["nested/e.gapmod".to_owned()];
        let found = ModLoader::<LinkedBundles>::discover(&cfg).expect("scan");
        let names: Vec<String> = found.iter().map(|p| bundle_name(p)).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }
}
