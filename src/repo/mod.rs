//! Package repository resolution
//!
//! A repository is a directory on IPFS whose entries are packages. Its root
//! is either an immutable path (`QmHash`, `/ipfs/QmHash`) or a mutable
//! `/ipns/` name that must be resolved first.
//!
//! ```text
//! query ──> fetch_repo ──> resolve_name (only /ipns/ roots) ──> cache <──> network
//!                 └──────> list (network)
//! ```

mod fetch;
mod query;
mod resolver;

pub use query::Refreshed;

use crate::cache::ResolutionCache;
use crate::client::StorageClient;
use std::collections::{BTreeMap, HashMap};

/// Prefix of mutable names that need resolving before use
pub const MUTABLE_PREFIX: &str = "/ipns/";

/// Package name to identifier, as published by one repository
pub type RepoListing = HashMap<String, String>;

/// Repository display name to root path
pub type Registry = BTreeMap<String, String>;

/// Repository display name to the identifier it publishes for a package
pub type QueryResult = BTreeMap<String, String>;

/// Check if a path is a mutable name
pub fn is_mutable(path: &str) -> bool {
    path.starts_with(MUTABLE_PREFIX)
}

/// Resolves, fetches and queries repositories
///
/// Borrows the network client and the resolution cache, both of which
/// outlive any single command.
pub struct RepoManager<'a> {
    client: &'a dyn StorageClient,
    cache: &'a ResolutionCache,
}

impl<'a> RepoManager<'a> {
    pub fn new(client: &'a dyn StorageClient, cache: &'a ResolutionCache) -> Self {
        Self { client, cache }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutable_prefix_detection() {
        assert!(is_mutable("/ipns/QmKey"));
        assert!(!is_mutable("/ipfs/QmHash"));
        assert!(!is_mutable("QmHash"));
        assert!(!is_mutable("ipns/QmKey"));
    }
}
