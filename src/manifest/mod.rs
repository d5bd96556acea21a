//! Project manifest (`package.json`) handling
//!
//! `document` models the JSON itself; `store` moves it to and from disk
//! through the runtime.

use std::path::{Path, PathBuf};

mod document;
mod store;

pub use document::{DependencySection, Manifest, ModulePackage};
pub use store::ManifestStore;

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Path of the manifest inside `dir`.
///
/// Returns: `<dir>/package.json`
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}
