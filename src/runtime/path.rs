//! Path utility functions for normalization and containment checks.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // At root there is nothing to pop; keep the `..`
                if !result.pop() {
                    result.push(component);
                }
            }
            _ => {
                result.push(component);
            }
        }
    }
    result
}

/// Check if `path` is under `dir` by comparing normalized path components.
///
/// `/project/node_modules/../../etc` is NOT under `/project/node_modules`.
pub(crate) fn is_path_under(path: &Path, dir: &Path) -> bool {
    let normalized_path = normalize_path(path);
    let normalized_dir = normalize_path(dir);

    let path_components: Vec<_> = normalized_path.components().collect();
    let dir_components: Vec<_> = normalized_dir.components().collect();

    if path_components.len() < dir_components.len() {
        return false;
    }

    dir_components
        .iter()
        .zip(path_components.iter())
        .all(|(d, p)| d == p)
}

/// Join a module name onto a module directory.
///
/// Returns `None` when the name would resolve to the directory itself or
/// escape it (absolute names, `..` segments). Scoped names like
/// `@scope/pkg` stay nested under the directory.
pub fn module_path(modules_dir: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    if relative.is_absolute() || relative.has_root() {
        return None;
    }

    let joined = modules_dir.join(relative);
    let normalized = normalize_path(&joined);
    if normalized == normalize_path(modules_dir) || !is_path_under(&normalized, modules_dir) {
        return None;
    }
    Some(joined)
}
