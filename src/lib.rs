pub mod commands;
pub mod error;
pub mod linker;
pub mod manifest;
pub mod npm;
pub mod runtime;

pub use error::{Error, Result};

/// Test utilities for cross-platform path handling.
#[cfg(test)]
pub mod test_utils {
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    /// Returns the test project directory based on the platform.
    /// - Unix: `/home/user/app`
    /// - Windows: `C:\Users\user\app`
    pub fn test_project_dir() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/user/app")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user\app")
        }
    }

    /// Returns the test npm global root based on the platform.
    /// - Unix: `/usr/local/lib/node_modules`
    /// - Windows: `C:\Users\user\AppData\Roaming\npm\node_modules`
    pub fn test_global_root() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/usr/local/lib/node_modules")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user\AppData\Roaming\npm\node_modules")
        }
    }

    /// Configure a mock runtime with common defaults for tests.
    /// - current_dir set to [`test_project_dir`]
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime
            .expect_current_dir()
            .returning(|| Ok(test_project_dir()));
    }
}
