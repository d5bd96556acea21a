//! Manifest store for reading and writing `package.json` files.

use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::runtime::Runtime;

use super::{Manifest, ModulePackage, manifest_path};

/// Reads project and module manifests through the runtime.
pub struct ManifestStore<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> ManifestStore<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Load the project manifest at `path`.
    #[tracing::instrument(skip(self))]
    pub fn load(&self, path: &Path) -> Result<Manifest> {
        let text = self.read(path)?;
        Manifest::parse(path, &text)
    }

    /// Overwrite the manifest at `path` with tab-indented JSON.
    #[tracing::instrument(skip(self, manifest))]
    pub fn save(&self, path: &Path, manifest: &Manifest) -> Result<()> {
        let content = manifest
            .to_pretty_json()
            .map_err(|e| Error::manifest(path, "failed to serialize", e))?;
        self.runtime
            .write(path, content.as_bytes())
            .map_err(|e| Error::manifest(path, "failed to write", e))?;
        debug!("Saved manifest to {:?}", path);
        Ok(())
    }

    /// Read the `version` declared by the module installed at `module_dir`.
    #[tracing::instrument(skip(self))]
    pub fn module_version(&self, name: &str, module_dir: &Path) -> Result<String> {
        let path = manifest_path(module_dir);
        let text = self.read(&path)?;
        let package = ModulePackage::parse(&path, &text)?;
        package
            .version()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingVersion {
                name: name.to_string(),
            })
    }

    fn read(&self, path: &Path) -> Result<String> {
        if !self.runtime.exists(path) {
            return Err(Error::not_found(path));
        }
        self.runtime
            .read_to_string(path)
            .map_err(|e| Error::manifest(path, "failed to read", e))
    }
}
