//! Error types for lnk.

use std::path::PathBuf;
use thiserror::Error;

/// Underlying cause carried by the error variants that wrap a collaborator failure.
pub type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using the lnk error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a link invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// The package manager's global root is missing or could not be resolved.
    #[error("{message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// A required file, module or field is missing.
    #[error("\"{}\" does not exist.", path.display())]
    NotFound { path: PathBuf },

    /// A module manifest has no `version` field.
    #[error("Version for module \"{name}\" does not exist.")]
    MissingVersion { name: String },

    /// The global install subprocess failed.
    #[error("Failed to install \"{name}@{version}\"")]
    Install {
        name: String,
        version: String,
        #[source]
        source: Source,
    },

    /// Creating the local link or its parent directory failed.
    #[error("Failed to link \"{}\" to \"{}\"", link.display(), target.display())]
    Link {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: Source,
    },

    /// The module name does not name a directory inside `node_modules`.
    #[error("Invalid module name \"{name}\"")]
    InvalidModuleName { name: String },

    /// The manifest could not be read, parsed or written.
    #[error("Invalid manifest \"{}\": {message}", path.display())]
    Manifest {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Source>,
    },
}

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a not-found error for a path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a manifest error with an underlying cause
    pub fn manifest(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Into<Source>,
    ) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a manifest error describing a malformed document
    pub fn malformed_manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Whether the error belongs to the not-found family.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingVersion { .. })
    }
}
