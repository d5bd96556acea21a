//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the filesystem calls the
//! linker makes, so the link procedure can be driven against a mock in tests.
//!
//! # Structure
//!
//! - `path` - Lexical path helpers (module paths under `node_modules`)
//! - `env` - Process environment (current directory)
//! - `fs` - File system operations (read, write, directory)
//! - `symlink` - Directory link creation (symlink or junction)

mod env;
mod fs;
pub mod path;
mod symlink;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn current_dir(&self) -> Result<PathBuf>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory link at `link` pointing to `original`.
    ///
    /// Windows gets a directory junction, every other platform a directory symlink.
    fn link_dir(&self, original: &Path, link: &Path) -> Result<()>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn link_dir(&self, original: &Path, link: &Path) -> Result<()> {
        self.link_dir_impl(original, link)
    }
}
