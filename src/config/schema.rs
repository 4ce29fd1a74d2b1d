//! Configuration schema for gxr
//!
//! Configuration is stored at `~/.config/gxr/config.toml`

use crate::repo::Registry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// IPFS API endpoint settings
    pub endpoint: EndpointSection,

    /// Resolution cache settings
    pub cache: CacheConfig,

    /// Registered repositories: display name to root path
    pub repos: Registry,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,

    /// Default number of concurrent fetches for `repo query`
    pub query_jobs: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            query_jobs: 1,
        }
    }
}

/// Endpoint settings, used when no flag or environment variable is given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSection {
    /// API host:port or URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,

    /// Local node runtime directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipfs_path: Option<PathBuf>,
}

/// Resolution cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file location (defaults to `~/.gxcache`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
