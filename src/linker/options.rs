use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Module name that selects every dependency recorded in the manifest.
pub const WILDCARD: &str = "*";

/// Version requested from the package manager when none is pinned.
pub const LATEST: &str = "latest";

/// Options for the link use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Record new entries under `devDependencies` and include them in wildcard runs
    pub target_dev: bool,
    /// Install `latest` even for wildcard modules that carry a recorded range
    pub force_latest: bool,
    /// Re-read the version of already linked modules and update their range
    pub refresh_version_on_existing_link: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            target_dev: false,
            force_latest: false,
            refresh_version_on_existing_link: true,
        }
    }
}

/// What to link: one module, or everything the manifest lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    All,
    Module(String),
}

impl FromStr for LinkTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(Error::InvalidModuleName {
                name: s.to_string(),
            }),
            WILDCARD => Ok(LinkTarget::All),
            name => Ok(LinkTarget::Module(name.to_string())),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::All => f.write_str(WILDCARD),
            LinkTarget::Module(name) => f.write_str(name),
        }
    }
}
