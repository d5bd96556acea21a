//! Link use case - puts globally installed modules into a project's `node_modules`.
//!
//! For every target module the linker:
//! - Reuses an existing local entry (optionally refreshing its recorded version)
//! - Installs the module globally when the global copy is missing
//! - Links `node_modules/<name>` to the global copy
//! - Records `^<version>` in `dependencies` or `devDependencies`
//!
//! The manifest is loaded once, threaded through every module and written once
//! at the end. Any error aborts the run before the write.

mod options;
mod outcome;

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::{DependencySection, Manifest, ManifestStore, manifest_path};
use crate::npm::PackageManager;
use crate::runtime::{Runtime, path::module_path};

pub use options::{LATEST, LinkOptions, LinkTarget, WILDCARD};
pub use outcome::{LinkOutcome, LinkReport};

/// Name of the local dependency directory inside a project.
pub const NODE_MODULES: &str = "node_modules";

/// Link use case
pub struct Linker<'a, R: Runtime, P: PackageManager> {
    runtime: &'a R,
    package_manager: &'a P,
    manifests: ManifestStore<'a, R>,
    options: LinkOptions,
}

/// Per-run state shared by every module of one invocation.
struct LinkRun<'m> {
    global_root: PathBuf,
    modules_dir: PathBuf,
    manifest: &'m mut Manifest,
}

impl<'a, R: Runtime, P: PackageManager> Linker<'a, R, P> {
    pub fn new(runtime: &'a R, package_manager: &'a P, options: LinkOptions) -> Self {
        Self {
            runtime,
            package_manager,
            manifests: ManifestStore::new(runtime),
            options,
        }
    }

    /// Link `target` into the project at `project_dir` and persist the manifest.
    #[tracing::instrument(skip(self))]
    pub async fn link(&self, target: &LinkTarget, project_dir: &Path) -> Result<LinkReport> {
        let global_root = self.resolve_global_root().await?;
        debug!("Using global root {:?}", global_root);

        let manifest_path = manifest_path(project_dir);
        let mut manifest = self.manifests.load(&manifest_path)?;

        let mut run = LinkRun {
            global_root,
            modules_dir: project_dir.join(NODE_MODULES),
            manifest: &mut manifest,
        };
        let mut outcomes = Vec::new();

        match target {
            LinkTarget::All => {
                let dependencies = run.manifest.entries(DependencySection::Dependencies);
                debug!("Linking {} dependencies", dependencies.len());
                for (name, range) in dependencies {
                    let requested = self.wildcard_version(&range);
                    outcomes.push(self.link_module(&mut run, &name, requested).await?);
                }

                if self.options.target_dev {
                    let dev_dependencies =
                        run.manifest.entries(DependencySection::DevDependencies);
                    debug!("Linking {} devDependencies", dev_dependencies.len());
                    for (name, range) in dev_dependencies {
                        let requested = self.wildcard_version(&range);
                        outcomes.push(self.link_module(&mut run, &name, requested).await?);
                    }
                }
            }
            LinkTarget::Module(name) => {
                outcomes.push(self.link_module(&mut run, name, LATEST).await?);
            }
        }

        self.manifests.save(&manifest_path, &manifest)?;

        Ok(LinkReport {
            manifest_path,
            outcomes,
        })
    }

    async fn resolve_global_root(&self) -> Result<PathBuf> {
        let root = self
            .package_manager
            .global_root()
            .await
            .map_err(|e| Error::Configuration {
                message: "Failed to query the global module root".to_string(),
                source: Some(e.into()),
            })?;

        if !self.runtime.exists(&root) {
            return Err(Error::configuration(format!(
                "\"{}\" does not exist.",
                root.display()
            )));
        }
        Ok(root)
    }

    fn wildcard_version<'r>(&self, recorded: &'r str) -> &'r str {
        if self.options.force_latest {
            LATEST
        } else {
            recorded
        }
    }

    /// Link a single module and record it in the run's manifest.
    #[tracing::instrument(skip(self, run))]
    async fn link_module(
        &self,
        run: &mut LinkRun<'_>,
        name: &str,
        requested_version: &str,
    ) -> Result<LinkOutcome> {
        let local = module_path(&run.modules_dir, name).ok_or_else(|| Error::InvalidModuleName {
            name: name.to_string(),
        })?;

        let (version, linked) = if self.runtime.exists(&local) {
            if !self.options.refresh_version_on_existing_link {
                debug!("{:?} exists, leaving {} untouched", local, name);
                return Ok(LinkOutcome::AlreadyLinked {
                    name: name.to_string(),
                });
            }
            debug!("{:?} exists, refreshing version of {}", local, name);
            (self.manifests.module_version(name, &local)?, false)
        } else {
            let global = self.ensure_global(&run.global_root, name, requested_version).await?;
            let version = self.manifests.module_version(name, &global)?;
            self.create_link(&global, &local)?;
            (version, true)
        };

        let range = format!("^{}", version);
        let section = run.manifest.section_of(name).unwrap_or(if self.options.target_dev {
            DependencySection::DevDependencies
        } else {
            DependencySection::Dependencies
        });
        let previous = run.manifest.set(section, name, &range);
        debug!("Recorded {}@{} in {} (was {:?})", name, range, section, previous);

        let outcome = if linked {
            LinkOutcome::Linked {
                name: name.to_string(),
                version,
            }
        } else if previous.as_deref() != Some(range.as_str()) {
            LinkOutcome::Updated {
                name: name.to_string(),
                version,
            }
        } else {
            LinkOutcome::Unchanged {
                name: name.to_string(),
            }
        };

        if outcome.is_notable() {
            info!("{}", outcome);
            println!("{}", outcome);
        }
        Ok(outcome)
    }

    /// Make sure `<global_root>/<name>` exists, installing it if needed.
    async fn ensure_global(
        &self,
        global_root: &Path,
        name: &str,
        requested_version: &str,
    ) -> Result<PathBuf> {
        let global = module_path(global_root, name).ok_or_else(|| Error::InvalidModuleName {
            name: name.to_string(),
        })?;

        if !self.runtime.exists(&global) {
            debug!("{:?} missing, installing {}@{}", global, name, requested_version);
            self.package_manager
                .install_global(name, requested_version)
                .await
                .map_err(|e| Error::Install {
                    name: name.to_string(),
                    version: requested_version.to_string(),
                    source: e.into(),
                })?;
        }

        if !self.runtime.exists(&global) {
            return Err(Error::not_found(global));
        }
        Ok(global)
    }

    fn create_link(&self, global: &Path, local: &Path) -> Result<()> {
        let link_error = |e: anyhow::Error| Error::Link {
            link: local.to_path_buf(),
            target: global.to_path_buf(),
            source: e.into(),
        };

        if let Some(parent) = local.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent).map_err(link_error)?;
        }

        self.runtime.link_dir(global, local).map_err(link_error)
    }
}
