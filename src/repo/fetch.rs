//! Repository listing fetch

use super::{is_mutable, Registry, RepoListing, RepoManager};
use crate::error::{GxrError, GxrResult};
use tracing::debug;

impl RepoManager<'_> {
    /// Fetch the packages a repository root publishes.
    ///
    /// `/ipns/` roots are resolved first (honouring `use_cache`); any other
    /// root is listed as-is. If the network returns the same name twice, the
    /// later entry wins.
    pub async fn fetch_repo(&self, root: &str, use_cache: bool) -> GxrResult<RepoListing> {
        let location = if is_mutable(root) {
            self.resolve_name(root, use_cache).await?
        } else {
            root.to_string()
        };

        let links = self.client.list(&location).await?;

        let mut listing = RepoListing::with_capacity(links.len());
        for link in links {
            if let Some(previous) = listing.insert(link.name.clone(), link.hash) {
                debug!(
                    "duplicate entry {} in {}, replacing {}",
                    link.name, location, previous
                );
            }
        }

        Ok(listing)
    }

    /// Fetch a registered repository by its display name
    pub async fn list_repo(
        &self,
        registry: &Registry,
        name: &str,
        use_cache: bool,
    ) -> GxrResult<RepoListing> {
        let root = registry
            .get(name)
            .ok_or_else(|| GxrError::RepoNotFound(name.to_string()))?;
        self.fetch_repo(root, use_cache).await
    }
}
