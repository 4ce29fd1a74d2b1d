//! Name resolution with a persistent cache

use super::RepoManager;
use crate::error::GxrResult;
use tracing::{debug, error};

impl RepoManager<'_> {
    /// Resolve a path to a content identifier.
    ///
    /// With `use_cache`, a cached entry is returned without touching the
    /// network. Every successful network resolution is written to the cache,
    /// whether or not the cache was consulted; a failed write fails the call.
    pub async fn resolve_name(&self, path: &str, use_cache: bool) -> GxrResult<String> {
        if use_cache {
            if let Some(cached) = self.cache.lookup(path).await? {
                return Ok(cached);
            }
        }

        debug!("resolving {} via {}", path, self.client.endpoint());
        let resolved = match self.client.resolve_path(path).await {
            Ok(resolved) => resolved,
            Err(e) => {
                error!("error from resolve path {}: {}", path, e);
                return Err(e);
            }
        };

        self.cache.store(path, &resolved).await?;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ResolutionCache, CACHE_FILE};
    use crate::error::GxrError;
    use crate::repo::testing::MockClient;
    use tempfile::TempDir;

    fn temp_cache() -> (ResolutionCache, TempDir) {
        let temp = TempDir::new().unwrap();
        (ResolutionCache::new(temp.path().join(CACHE_FILE)), temp)
    }

    #[tokio::test]
    async fn cached_path_skips_network() {
        let (cache, _temp) = temp_cache();
        cache.store("/ipns/QmKey", "QmCached").await.unwrap();
        let client = MockClient::new().with_resolution("/ipns/QmKey", "QmFresh");

        let manager = RepoManager::new(&client, &cache);
        let id = manager.resolve_name("/ipns/QmKey", true).await.unwrap();

        assert_eq!(id, "QmCached");
        assert_eq!(client.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn bypassing_cache_always_hits_network() {
        let (cache, _temp) = temp_cache();
        cache.store("/ipns/QmKey", "QmCached").await.unwrap();
        let client = MockClient::new().with_resolution("/ipns/QmKey", "QmFresh");

        let manager = RepoManager::new(&client, &cache);
        let id = manager.resolve_name("/ipns/QmKey", false).await.unwrap();

        assert_eq!(id, "QmFresh");
        assert_eq!(client.resolve_calls(), 1);
        assert_eq!(
            cache.lookup("/ipns/QmKey").await.unwrap().as_deref(),
            Some("QmFresh")
        );
    }

    #[tokio::test]
    async fn cache_miss_resolves_and_stores() {
        let (cache, _temp) = temp_cache();
        let client = MockClient::new().with_resolution("/ipns/QmKey", "QmFresh");

        let manager = RepoManager::new(&client, &cache);
        assert_eq!(manager.resolve_name("/ipns/QmKey", true).await.unwrap(), "QmFresh");
        assert_eq!(manager.resolve_name("/ipns/QmKey", true).await.unwrap(), "QmFresh");

        assert_eq!(client.resolve_calls(), 1);
    }

    #[tokio::test]
    async fn resolution_failure_propagates_without_caching() {
        let (cache, _temp) = temp_cache();
        let client = MockClient::new();

        let manager = RepoManager::new(&client, &cache);
        let err = manager.resolve_name("/ipns/QmMissing", true).await.unwrap_err();

        assert!(matches!(err, GxrError::Api { .. }));
        assert!(cache.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_cache_fails_lookup() {
        let (cache, _temp) = temp_cache();
        std::fs::write(cache.path(), "[1, 2").unwrap();
        let client = MockClient::new().with_resolution("/ipns/QmKey", "QmFresh");

        let manager = RepoManager::new(&client, &cache);
        let err = manager.resolve_name("/ipns/QmKey", true).await.unwrap_err();

        assert!(matches!(err, GxrError::CacheCorrupt { .. }));
        assert_eq!(client.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_after_successful_resolution() {
        let (cache, _temp) = temp_cache();
        std::fs::write(cache.path(), "{oops").unwrap();
        let client = MockClient::new().with_resolution("/ipns/QmKey", "QmFresh");

        let manager = RepoManager::new(&client, &cache);
        let err = manager.resolve_name("/ipns/QmKey", false).await.unwrap_err();

        assert!(matches!(err, GxrError::CacheCorrupt { .. }));
        assert_eq!(client.resolve_calls(), 1);
    }
}
