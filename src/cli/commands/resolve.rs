//! Resolve command - print the identifier a path resolves to

use super::open_cache;
use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::endpoint::{create_client, EndpointConfig};
use crate::error::GxrResult;
use crate::repo::RepoManager;

/// Execute the resolve command
///
/// Prints only the identifier, so the output can be captured by scripts.
pub async fn execute(args: ResolveArgs, config: &Config, endpoint: &EndpointConfig) -> GxrResult<()> {
    let client = create_client(endpoint).await;
    let cache = open_cache(config)?;
    let repos = RepoManager::new(&client, &cache);

    let id = repos.resolve_name(&args.path, !args.no_cache).await?;
    println!("{}", id);
    Ok(())
}
