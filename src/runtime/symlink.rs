//! Directory link creation (symlink on Unix, junction on Windows).

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn link_dir_impl(&self, original: &Path, link: &Path) -> Result<()> {
        debug!("Creating directory link from {:?} to {:?}", link, original);

        #[cfg(unix)]
        {
            use std::os::unix::fs::symlink as unix_symlink;
            unix_symlink(original, link).with_context(|| {
                format!(
                    "Failed to create symlink {} -> {}",
                    link.display(),
                    original.display()
                )
            })?;
        }
        #[cfg(windows)]
        {
            use anyhow::bail;
            use std::fs;
            use std::process::Command;

            // Junctions need no elevation, unlike directory symlinks.
            let output = Command::new("cmd")
                .arg("/C")
                .arg("mklink")
                .arg("/J")
                .arg(link)
                .arg(original)
                .output()
                .context("Failed to run mklink")?;

            if !output.status.success() {
                bail!(
                    "mklink /J {} {} failed: {}",
                    link.display(),
                    original.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }

            if fs::symlink_metadata(link).is_err() {
                bail!(
                    "Junction creation reported success but link does not exist: link={:?} target={:?}",
                    link,
                    original
                );
            }
        }
        Ok(())
    }
}
