//! Configuration management for gxr

pub mod schema;

pub use schema::Config;

use crate::error::{GxrError, GxrResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use toml_edit::DocumentMut;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gxr")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> GxrResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> GxrResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| GxrError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| GxrError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> GxrResult<()> {
        let content = toml::to_string_pretty(config)?;
        self.write(&content).await?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Register a repository, keeping the rest of the file untouched
    pub async fn add_repo(&self, name: &str, root: &str) -> GxrResult<()> {
        if name.trim().is_empty() {
            return Err(GxrError::User("Repository name cannot be empty".to_string()));
        }
        if root.trim().is_empty() {
            return Err(GxrError::User("Repository path cannot be empty".to_string()));
        }

        let mut doc = self.read_document().await?;
        let repos = doc
            .entry("repos")
            .or_insert(toml_edit::table())
            .as_table_like_mut()
            .ok_or_else(|| self.invalid("'repos' must be a table"))?;

        if repos.contains_key(name) {
            return Err(GxrError::RepoExists(name.to_string()));
        }
        repos.insert(name, toml_edit::value(root));

        self.write(&doc.to_string()).await?;
        info!("Added repository {} -> {}", name, root);
        Ok(())
    }

    /// Unregister a repository. Returns the root it pointed to.
    pub async fn remove_repo(&self, name: &str) -> GxrResult<String> {
        let mut doc = self.read_document().await?;
        let removed = doc
            .get_mut("repos")
            .and_then(|item| item.as_table_like_mut())
            .and_then(|repos| repos.remove(name))
            .ok_or_else(|| GxrError::RepoNotFound(name.to_string()))?;

        self.write(&doc.to_string()).await?;
        info!("Removed repository {}", name);
        Ok(removed.as_str().unwrap_or_default().to_string())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    async fn read_document(&self) -> GxrResult<DocumentMut> {
        if !self.config_path.exists() {
            return Ok(DocumentMut::new());
        }

        let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
            GxrError::io(
                format!("reading config from {}", self.config_path.display()),
                e,
            )
        })?;

        content
            .parse::<DocumentMut>()
            .map_err(|e| self.invalid(&e.to_string()))
    }

    async fn write(&self, content: &str) -> GxrResult<()> {
        self.ensure_config_dir().await?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            GxrError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> GxrResult<()> {
        if let Some(parent) = self.config_path.parent() {
            if parent.as_os_str().is_empty() {
                return Ok(());
            }
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GxrError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> GxrError {
        GxrError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
