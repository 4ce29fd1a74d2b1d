//! Queries across every registered repository

use super::{is_mutable, QueryResult, Registry, RepoManager};
use crate::error::{GxrError, GxrResult};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

/// A repository whose cached root was refreshed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed {
    pub name: String,
    pub root: String,
    pub identifier: String,
}

impl RepoManager<'_> {
    /// Find which repositories publish `package`.
    ///
    /// Repositories are fetched one at a time, with the resolution cache
    /// enabled. The first fetch failure fails the whole query.
    pub async fn query(&self, registry: &Registry, package: &str) -> GxrResult<QueryResult> {
        self.query_with_progress(registry, package, 1, |_| {}).await
    }

    /// Like [`query`](Self::query), with up to `jobs` fetches in flight.
    ///
    /// On the first failure the remaining fetches are dropped.
    pub async fn query_concurrent(
        &self,
        registry: &Registry,
        package: &str,
        jobs: usize,
    ) -> GxrResult<QueryResult> {
        self.query_with_progress(registry, package, jobs, |_| {}).await
    }

    /// Query with a callback invoked after each repository is fetched
    pub async fn query_with_progress<F>(
        &self,
        registry: &Registry,
        package: &str,
        jobs: usize,
        on_fetched: F,
    ) -> GxrResult<QueryResult>
    where
        F: Fn(&str),
    {
        let mut results = QueryResult::new();

        if jobs <= 1 {
            for (name, root) in registry {
                let listing = self.fetch_repo(root, true).await?;
                on_fetched(name);
                if let Some(id) = listing.get(package) {
                    results.insert(name.clone(), id.clone());
                }
            }
            return Ok(results);
        }

        let on_fetched = &on_fetched;
        let matches: Vec<Option<(String, String)>> = stream::iter(registry)
            .map(move |(name, root)| async move {
                let listing = self.fetch_repo(root, true).await?;
                on_fetched(name);
                Ok::<_, GxrError>(listing.get(package).map(|id| (name.clone(), id.clone())))
            })
            .buffer_unordered(jobs)
            .try_collect()
            .await?;

        results.extend(matches.into_iter().flatten());
        Ok(results)
    }

    /// Re-resolve mutable repository roots, bypassing the cache.
    ///
    /// With `only`, just that repository is refreshed. Immutable roots are
    /// skipped. Stops at the first failure.
    pub async fn update_cache(
        &self,
        registry: &Registry,
        only: Option<&str>,
    ) -> GxrResult<Vec<Refreshed>> {
        if let Some(name) = only {
            if !registry.contains_key(name) {
                return Err(GxrError::RepoNotFound(name.to_string()));
            }
        }

        let mut refreshed = Vec::new();
        for (name, root) in registry {
            if only.is_some_and(|o| o != name.as_str()) {
                continue;
            }
            if !is_mutable(root) {
                debug!("skipping {}: {} is immutable", name, root);
                continue;
            }

            let identifier = self.resolve_name(root, false).await?;
            info!("refreshed {} ({}) -> {}", name, root, identifier);
            refreshed.push(Refreshed {
                name: name.clone(),
                root: root.clone(),
                identifier,
            });
        }

        Ok(refreshed)
    }
}
