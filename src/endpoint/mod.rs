//! API endpoint discovery
//!
//! Picks the IPFS API endpoint once per process. First match wins:
//! 1. Explicit endpoint override (`--api` / `IPFS_API` / `[endpoint] api`)
//! 2. Local node: `<ipfs_path>/api` (default `~/.ipfs/api`), a multiaddr
//! 3. The public gateway
//!
//! Failures in step 2 are never surfaced; they only move on to step 3.

mod multiaddr;

pub use multiaddr::multiaddr_to_host;

use crate::client::HttpClient;
use crate::error::{GxrError, GxrResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Public gateway used when no node can be found
pub const PUBLIC_GATEWAY: &str = "https://ipfs.io";

/// Name of the file a running node writes its API address to
pub const API_FILE: &str = "api";

/// Default node runtime directory, relative to the home directory
pub const DEFAULT_NODE_DIR: &str = ".ipfs";

/// Endpoint options, populated once by the CLI layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Use this API host verbatim, skipping discovery
    pub api_endpoint: Option<String>,

    /// Node runtime directory to look for the `api` file in
    pub node_runtime_dir: Option<PathBuf>,
}

/// Where the selected endpoint came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSource {
    Override,
    LocalNode(PathBuf),
    PublicGateway,
}

/// The endpoint chosen for this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `host:port` or URL handed to the HTTP client
    pub address: String,
    pub source: EndpointSource,
}

impl Endpoint {
    /// Build the storage network client for this endpoint
    pub fn client(&self) -> HttpClient {
        HttpClient::new(&self.address)
    }
}

/// Resolve the endpoint using the user's home directory for discovery
pub async fn resolve_endpoint(config: &EndpointConfig) -> Endpoint {
    resolve_endpoint_with_home(config, dirs::home_dir().as_deref()).await
}

/// Resolve the endpoint and build a client for it
pub async fn create_client(config: &EndpointConfig) -> HttpClient {
    resolve_endpoint(config).await.client()
}

async fn resolve_endpoint_with_home(config: &EndpointConfig, home: Option<&Path>) -> Endpoint {
    if let Some(api) = config.api_endpoint.as_deref().filter(|a| !a.is_empty()) {
        info!("using '{}' from endpoint override as api endpoint", api);
        return Endpoint {
            address: api.to_string(),
            source: EndpointSource::Override,
        };
    }

    match discover_local(config, home).await {
        Ok((address, dir)) => {
            info!("using local node api at {} ({})", address, dir.display());
            return Endpoint {
                address,
                source: EndpointSource::LocalNode(dir),
            };
        }
        Err(e) => debug!("local node discovery failed: {}", e),
    }

    info!("using public gateway {} as api endpoint", PUBLIC_GATEWAY);
    Endpoint {
        address: PUBLIC_GATEWAY.to_string(),
        source: EndpointSource::PublicGateway,
    }
}

/// Read and convert the local node's `api` file
async fn discover_local(
    config: &EndpointConfig,
    home: Option<&Path>,
) -> GxrResult<(String, PathBuf)> {
    let dir = match config
        .node_runtime_dir
        .as_ref()
        .filter(|d| !d.as_os_str().is_empty())
    {
        Some(dir) => dir.clone(),
        None => home.ok_or(GxrError::HomeDirNotFound)?.join(DEFAULT_NODE_DIR),
    };

    let api_file = dir.join(API_FILE);
    let data = fs::read_to_string(&api_file)
        .await
        .map_err(|e| GxrError::io(format!("reading {}", api_file.display()), e))?;

    let addr = data.trim_matches(|c| c == '\n' || c == '\t' || c == ' ');
    let host = multiaddr_to_host(addr)?;
    Ok((host, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StorageClient;
    use tempfile::TempDir;

    fn node_dir_with_api(contents: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(API_FILE), contents).unwrap();
        temp
    }

    #[tokio::test]
    async fn override_wins_over_local_node() {
        let node = node_dir_with_api("/ip4/127.0.0.1/tcp/5001");
        let config = EndpointConfig {
            api_endpoint: Some("remote:5001".to_string()),
            node_runtime_dir: Some(node.path().to_path_buf()),
        };

        let endpoint = resolve_endpoint_with_home(&config, None).await;
        assert_eq!(endpoint.address, "remote:5001");
        assert_eq!(endpoint.source, EndpointSource::Override);
    }

    #[tokio::test]
    async fn empty_override_is_ignored() {
        let node = node_dir_with_api("/ip4/127.0.0.1/tcp/5001\n");
        let config = EndpointConfig {
            api_endpoint: Some(String::new()),
            node_runtime_dir: Some(node.path().to_path_buf()),
        };

        let endpoint = resolve_endpoint_with_home(&config, None).await;
        assert_eq!(endpoint.address, "127.0.0.1:5001");
    }

    #[tokio::test]
    async fn local_node_from_runtime_dir() {
        let node = node_dir_with_api("\t/ip4/127.0.0.1/tcp/5002 \n");
        let config = EndpointConfig {
            api_endpoint: None,
            node_runtime_dir: Some(node.path().to_path_buf()),
        };

        let endpoint = resolve_endpoint_with_home(&config, None).await;
        assert_eq!(endpoint.address, "127.0.0.1:5002");
        assert_eq!(
            endpoint.source,
            EndpointSource::LocalNode(node.path().to_path_buf())
        );
    }

    #[tokio::test]
    async fn local_node_from_home_default() {
        let home = TempDir::new().unwrap();
        let node_dir = home.path().join(DEFAULT_NODE_DIR);
        std::fs::create_dir_all(&node_dir).unwrap();
        std::fs::write(node_dir.join(API_FILE), "/ip6/::1/tcp/5001").unwrap();

        let endpoint = resolve_endpoint_with_home(&EndpointConfig::default(), Some(home.path())).await;
        assert_eq!(endpoint.address, "[::1]:5001");
        assert_eq!(endpoint.source, EndpointSource::LocalNode(node_dir));
    }

    #[tokio::test]
    async fn falls_back_to_gateway_when_api_file_missing() {
        let home = TempDir::new().unwrap();

        let endpoint = resolve_endpoint_with_home(&EndpointConfig::default(), Some(home.path())).await;
        assert_eq!(endpoint.address, PUBLIC_GATEWAY);
        assert_eq!(endpoint.source, EndpointSource::PublicGateway);
    }

    #[tokio::test]
    async fn falls_back_to_gateway_on_bad_multiaddr() {
        let node = node_dir_with_api("localhost:5001");
        let config = EndpointConfig {
            api_endpoint: None,
            node_runtime_dir: Some(node.path().to_path_buf()),
        };

        let endpoint = resolve_endpoint_with_home(&config, None).await;
        assert_eq!(endpoint.source, EndpointSource::PublicGateway);
    }

    #[tokio::test]
    async fn falls_back_to_gateway_without_home() {
        let endpoint = resolve_endpoint_with_home(&EndpointConfig::default(), None).await;
        assert_eq!(endpoint.address, PUBLIC_GATEWAY);
    }

    #[test]
    fn endpoint_builds_client() {
        let endpoint = Endpoint {
            address: "127.0.0.1:5001".to_string(),
            source: EndpointSource::Override,
        };
        assert_eq!(endpoint.client().endpoint(), "http://127.0.0.1:5001");
    }
}
