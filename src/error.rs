//! Error types for gxr
//!
//! All modules use `GxrResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gxr operations
pub type GxrResult<T> = Result<T, GxrError>;

/// All errors that can occur in gxr
#[derive(Error, Debug)]
pub enum GxrError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    // Registry errors
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Repository already exists: {0}")]
    RepoExists(String),

    // Resolution cache errors
    #[error("Resolution cache {path} is corrupt: {source}")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Storage network errors
    #[error("Invalid multiaddr '{addr}': {reason}")]
    InvalidMultiaddr { addr: String, reason: String },

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("IPFS API error ({status}): {message}")]
    Api { status: u16, message: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl GxrError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP transport error for a request URL
    pub fn http(url: impl Into<String>, source: ureq::Error) -> Self {
        Self::Http {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Create a multiaddr parse error
    pub fn multiaddr(addr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMultiaddr {
            addr: addr.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheCorrupt { .. } => Some("Run: gxr cache clear"),
            Self::RepoNotFound(_) => Some("Run: gxr repo ls"),
            Self::RepoExists(_) => Some("Remove it first with: gxr repo rm <name>"),
            Self::Http { .. } => {
                Some("Is the IPFS daemon running? Set IPFS_API to point at a reachable node")
            }
            _ => None,
        }
    }
}
