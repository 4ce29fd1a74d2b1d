//! IPFS HTTP API client
//!
//! Talks to `/api/v0/resolve` and `/api/v0/ls` of a node or gateway.
//! `ureq` is blocking, so every request runs on tokio's blocking pool.

use super::{Link, StorageClient};
use crate::error::{GxrError, GxrResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

const IPFS_PREFIX: &str = "/ipfs/";

/// Storage network client backed by the IPFS HTTP API
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    agent: Agent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResolveResponse {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsResponse {
    objects: Option<Vec<LsObject>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsObject {
    links: Option<Vec<LsLink>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsLink {
    name: String,
    hash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    message: String,
}

impl HttpClient {
    /// Create a client for an endpoint (`host:port` or a full URL)
    pub fn new(endpoint: &str) -> Self {
        // Non-2xx bodies carry the IPFS error message, so read them ourselves
        let config = Agent::config_builder().http_status_as_error(false).build();
        Self {
            base_url: base_url(endpoint),
            agent: Agent::new_with_config(config),
        }
    }

    /// Issue an API command and return the raw response body
    fn call(&self, command: &str, arg: &str) -> GxrResult<String> {
        let url = format!("{}/api/v0/{}", self.base_url, command);
        debug!("POST {} arg={}", url, arg);

        let mut response = self
            .agent
            .post(&url)
            .query("arg", arg)
            .send_empty()
            .map_err(|e| GxrError::http(&url, e))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GxrError::http(&url, e))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn call_blocking(&self, command: &'static str, arg: &str) -> GxrResult<String> {
        let client = self.clone();
        let arg = arg.to_string();
        tokio::task::spawn_blocking(move || client.call(command, &arg))
            .await
            .map_err(|e| GxrError::Internal(format!("HTTP worker failed: {}", e)))?
    }
}

#[async_trait]
impl StorageClient for HttpClient {
    async fn resolve_path(&self, path: &str) -> GxrResult<String> {
        let body = self.call_blocking("resolve", path).await?;
        parse_resolve(&body)
    }

    async fn list(&self, location: &str) -> GxrResult<Vec<Link>> {
        let body = self.call_blocking("ls", location).await?;
        parse_ls(&body)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Turn an endpoint into a base URL, defaulting to plain HTTP
fn base_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

fn parse_resolve(body: &str) -> GxrResult<String> {
    let resolved: ResolveResponse = serde_json::from_str(body)?;
    let path = resolved.path;
    Ok(match path.strip_prefix(IPFS_PREFIX) {
        Some(id) => id.to_string(),
        None => path,
    })
}

fn parse_ls(body: &str) -> GxrResult<Vec<Link>> {
    let listing: LsResponse = serde_json::from_str(body)?;
    let links = listing
        .objects
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|object| object.links)
        .unwrap_or_default()
        .into_iter()
        .map(|l| Link::new(l.name, l.hash))
        .collect();
    Ok(links)
}

fn api_error(status: u16, body: &str) -> GxrError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());
    GxrError::Api { status, message }
}
