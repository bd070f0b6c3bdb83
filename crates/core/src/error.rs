use thiserror::Error;

/// Errors that can occur while reading a granted directory.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// IO error surfaced by a host directory adapter.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The host revoked access to an entry after it was granted.
    #[error("Access to '{path}' is no longer permitted")]
    AccessRevoked {
        /// Path of the entry that could not be read.
        path: String,
    },
    /// The entry vanished between enumeration and read.
    #[error("Entry '{path}' no longer exists")]
    NotFound {
        /// Path of the missing entry.
        path: String,
    },
    /// Host-specific failure that fits no other variant.
    #[error("Host error: {0}")]
    Host(String),
}

impl PreviewError {
    /// Create an access-revoked error for the given path.
    pub fn access_revoked(path: impl Into<String>) -> Self {
        Self::AccessRevoked { path: path.into() }
    }

    /// Create a not-found error for the given path.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

/// Errors emitted while parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `docs.json` failed to parse.
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),
    /// `docs.yaml` failed to parse.
    #[error("YAML configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Top-level node was not a mapping.
    #[error("Configuration must be a mapping at the top level")]
    InvalidRootType,
}
