//! Storage network client abstraction
//!
//! The resolver, fetcher and query code only need two capabilities from the
//! network: resolve a path to an immutable identifier, and list a directory.
//! `HttpClient` implements them against the IPFS HTTP API.

mod http;

pub use http::HttpClient;

use crate::error::GxrResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Entry name within the directory
    pub name: String,

    /// Content identifier the entry points to
    pub hash: String,
}

impl Link {
    pub fn new(name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
        }
    }
}

/// Operations consumed from the storage network
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Resolve a (possibly mutable) path to a content identifier
    async fn resolve_path(&self, path: &str) -> GxrResult<String>;

    /// List the immediate entries of a directory
    async fn list(&self, location: &str) -> GxrResult<Vec<Link>>;

    /// Base URL of the API this client talks to, for display
    fn endpoint(&self) -> &str;
}
