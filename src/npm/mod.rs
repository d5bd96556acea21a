//! Host package manager access.
//!
//! The linker only needs two things from npm: where global modules live and a
//! way to install one there. Both are behind [`PackageManager`] so tests can
//! script them.

mod progress;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use progress::InstallProgress;

/// Default executable used to reach npm.
#[cfg(windows)]
pub const DEFAULT_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
pub const DEFAULT_PROGRAM: &str = "npm";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Directory global modules are installed into.
    async fn global_root(&self) -> Result<PathBuf>;

    /// Install `name@version` globally, returning the package manager's output.
    async fn install_global(&self, name: &str, version: &str) -> Result<String>;
}

/// [`PackageManager`] backed by the `npm` command line.
pub struct Npm {
    program: OsString,
}

impl Default for Npm {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Npm {
    #[tracing::instrument]
    pub fn new(program: Option<OsString>) -> Self {
        let program = program.unwrap_or_else(|| DEFAULT_PROGRAM.into());
        Self { program }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running {:?} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to execute {:?}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{:?} {} failed ({}): {}",
                self.program,
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl PackageManager for Npm {
    #[tracing::instrument(skip(self))]
    async fn global_root(&self) -> Result<PathBuf> {
        let root = self.run(&["-g", "root"]).await?;
        if root.is_empty() {
            bail!("{:?} -g root printed nothing", self.program);
        }
        Ok(PathBuf::from(root))
    }

    #[tracing::instrument(skip(self))]
    async fn install_global(&self, name: &str, version: &str) -> Result<String> {
        let spec = format!("{}@{}", name, version);
        let progress = InstallProgress::start(&spec);

        match self.run(&["install", "-g", &spec]).await {
            Ok(output) => {
                progress.finish();
                Ok(output)
            }
            Err(e) => {
                progress.abandon();
                Err(e)
            }
        }
    }
}
