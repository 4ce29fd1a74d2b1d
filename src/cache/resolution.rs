//! Resolution cache backed by a single JSON file

use crate::error::{GxrError, GxrResult};
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Cache file name, placed in the home directory
pub const CACHE_FILE: &str = ".gxcache";

type Document = BTreeMap<String, String>;

/// Path to identifier cache
#[derive(Debug)]
pub struct ResolutionCache {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ResolutionCache {
    /// Create a cache backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the default cache file path (`~/.gxcache`)
    pub fn default_path() -> GxrResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CACHE_FILE))
            .ok_or(GxrError::HomeDirNotFound)
    }

    /// Open the cache at its default location
    pub fn open_default() -> GxrResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the cached identifier for a path
    pub async fn lookup(&self, path: &str) -> GxrResult<Option<String>> {
        let Some(mut doc) = self.read_document().await? else {
            return Ok(None);
        };

        let found = doc.remove(path);
        if found.is_some() {
            debug!("resolution cache hit for {}", path);
        }
        Ok(found)
    }

    /// Record the identifier a path resolved to, replacing any prior entry
    pub async fn store(&self, path: &str, identifier: &str) -> GxrResult<()> {
        let guard = self.write_lock.clone().lock_owned().await;

        let mut doc = self.read_document().await?.unwrap_or_default();
        doc.insert(path.to_string(), identifier.to_string());
        self.write_document(&doc, guard).await?;

        debug!("cached {} -> {}", path, identifier);
        Ok(())
    }

    /// All cached entries, sorted by path
    pub async fn entries(&self) -> GxrResult<BTreeMap<String, String>> {
        Ok(self.read_document().await?.unwrap_or_default())
    }

    /// Delete the cache file. Returns whether it existed.
    pub async fn clear(&self) -> GxrResult<bool> {
        let _guard = self.write_lock.lock().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GxrError::io(
                format!("removing cache file {}", self.path.display()),
                e,
            )),
        }
    }

    async fn read_document(&self) -> GxrResult<Option<Document>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GxrError::io(
                    format!("reading cache file {}", self.path.display()),
                    e,
                ))
            }
        };

        let doc = serde_json::from_str(&content).map_err(|source| GxrError::CacheCorrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(doc))
    }

    /// Replace the cache file with `doc`.
    ///
    /// Temp file, write and rename run as one blocking task that holds the
    /// writer lock until the rename is done, even if the caller is dropped.
    async fn write_document(&self, doc: &Document, guard: OwnedMutexGuard<()>) -> GxrResult<()> {
        let mut content = serde_json::to_string(doc)?;
        content.push('\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            replace_file(&path, content.as_bytes())
        })
        .await
        .map_err(|e| GxrError::Internal(format!("Cache writer failed: {}", e)))?
    }
}

/// Write `content` next to `path` and rename it into place
fn replace_file(path: &Path, content: &[u8]) -> GxrResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|e| GxrError::io(format!("creating directory {}", dir.display()), e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| CACHE_FILE.to_string());
    let prefix = format!(".{}.", file_name.trim_start_matches('.'));

    // Removed on drop unless persisted
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| GxrError::io(format!("creating temp file in {}", dir.display()), e))?;

    tmp.write_all(content)
        .map_err(|e| GxrError::io(format!("writing cache file {}", tmp.path().display()), e))?;

    tmp.persist(path)
        .map_err(|e| GxrError::io(format!("replacing cache file {}", path.display()), e.error))?;

    Ok(())
}
