use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a bundle run before anything is written.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The manifest file is absent or unreadable.
    #[error("failed to read manifest {path:?}")]
    ManifestRead {
        /// Manifest location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// The manifest is not valid JSON or has no `dependencies` mapping.
    #[error("failed to parse manifest {path:?}")]
    ManifestParse {
        /// Manifest location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: serde_json::Error,
    },

    /// A dependency named in the manifest has no listable directory.
    #[error("directory for dependency '{name}' is missing or unreadable: {path:?}")]
    DependencyDirectoryMissing {
        /// Dependency key from the manifest
        name: String,
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// The previous bundle exists but could not be read for comparison.
    #[error("failed to read existing bundle {path:?}")]
    OutputRead {
        /// Bundle location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// The bundle could not be written.
    #[error("failed to write bundle {path:?}")]
    OutputWrite {
        /// Bundle location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },
}

/// Result alias used across the bundle pipeline.
pub type Result<T, E = BundleError> = std::result::Result<T, E>;
