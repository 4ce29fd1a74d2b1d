//! Repo command - register, list and query package repositories

use super::{open_cache, print_map};
use crate::cli::args::{OutputFormat, RepoAction, RepoArgs};
use crate::config::{Config, ConfigManager};
use crate::endpoint::{create_client, EndpointConfig};
use crate::error::{GxrError, GxrResult};
use crate::repo::{is_mutable, RepoManager};
use crate::ui::{self, QueryProgress, TaskSpinner, UiContext};
use std::collections::BTreeMap;
use tracing::debug;

/// Execute the repo command
pub async fn execute(
    args: RepoArgs,
    config: &Config,
    manager: &ConfigManager,
    endpoint: &EndpointConfig,
) -> GxrResult<()> {
    match args.action {
        RepoAction::Add { name, path } => add(config, manager, endpoint, &name, &path).await,
        RepoAction::Rm { name } => remove(manager, &name).await,
        RepoAction::Ls { format } => show_registry(config, format),
        RepoAction::List {
            name,
            no_cache,
            format,
        } => list(config, endpoint, &name, !no_cache, format).await,
        RepoAction::Query {
            package,
            jobs,
            format,
        } => {
            let jobs = jobs.unwrap_or(config.general.query_jobs);
            query(config, endpoint, &package, jobs, format).await
        }
        RepoAction::UpdateCache { name } => update_cache(config, endpoint, name.as_deref()).await,
    }
}

async fn add(
    config: &Config,
    manager: &ConfigManager,
    endpoint: &EndpointConfig,
    name: &str,
    path: &str,
) -> GxrResult<()> {
    let ctx = UiContext::detect();

    if config.repos.contains_key(name) {
        return Err(GxrError::RepoExists(name.to_string()));
    }

    // Validate mutable roots up front; this also warms the cache
    if is_mutable(path) {
        let client = create_client(endpoint).await;
        let cache = open_cache(config)?;
        let repos = RepoManager::new(&client, &cache);

        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start(&format!("Resolving {}...", path));
        match repos.resolve_name(path, false).await {
            Ok(id) => spinner.stop(&format!("Resolved {} to {}", path, id)),
            Err(e) => {
                spinner.stop_error(&format!("Could not resolve {}", path));
                return Err(e);
            }
        }
    }

    manager.add_repo(name, path).await?;
    ui::step_ok_detail(&ctx, &format!("Added repository {}", name), path);
    Ok(())
}

async fn remove(manager: &ConfigManager, name: &str) -> GxrResult<()> {
    let ctx = UiContext::detect();
    let root = manager.remove_repo(name).await?;
    ui::step_ok_detail(&ctx, &format!("Removed repository {}", name), &root);
    Ok(())
}

fn show_registry(config: &Config, format: OutputFormat) -> GxrResult<()> {
    let ctx = UiContext::detect();

    if config.repos.is_empty() && format == OutputFormat::Table {
        ui::step_info(&ctx, "No repositories configured");
        ui::remark(&ctx, "Add one with: gxr repo add <name> <path>");
        return Ok(());
    }

    print_map(&ctx, &config.repos, format, ("NAME", "PATH"))
}

async fn list(
    config: &Config,
    endpoint: &EndpointConfig,
    name: &str,
    use_cache: bool,
    format: OutputFormat,
) -> GxrResult<()> {
    let ctx = UiContext::detect();
    let client = create_client(endpoint).await;
    let cache = open_cache(config)?;
    let repos = RepoManager::new(&client, &cache);

    let listing = repos.list_repo(&config.repos, name, use_cache).await?;
    debug!("{} publishes {} packages", name, listing.len());

    if listing.is_empty() && format == OutputFormat::Table {
        ui::step_info(&ctx, &format!("Repository {} publishes no packages", name));
        return Ok(());
    }

    let sorted: BTreeMap<String, String> = listing.into_iter().collect();
    print_map(&ctx, &sorted, format, ("PACKAGE", "HASH"))
}

async fn query(
    config: &Config,
    endpoint: &EndpointConfig,
    package: &str,
    jobs: usize,
    format: OutputFormat,
) -> GxrResult<()> {
    let ctx = UiContext::detect();

    if config.repos.is_empty() {
        if format == OutputFormat::Table {
            ui::step_info(&ctx, "No repositories configured");
            ui::remark(&ctx, "Add one with: gxr repo add <name> <path>");
        } else {
            print_map(&ctx, &BTreeMap::new(), format, ("REPO", "HASH"))?;
        }
        return Ok(());
    }

    let client = create_client(endpoint).await;
    let cache = open_cache(config)?;
    let repos = RepoManager::new(&client, &cache);

    let progress_ctx = if format == OutputFormat::Table {
        ctx.clone()
    } else {
        UiContext::non_interactive()
    };
    let progress = QueryProgress::new(&progress_ctx, config.repos.len(), package);
    let results = repos
        .query_with_progress(&config.repos, package, jobs, |repo| progress.fetched(repo))
        .await;
    progress.finish();
    let results = results?;

    if results.is_empty() && format == OutputFormat::Table {
        ui::step_warn(&ctx, &format!("No repository provides {}", package));
        return Ok(());
    }

    print_map(&ctx, &results, format, ("REPO", "HASH"))
}

async fn update_cache(
    config: &Config,
    endpoint: &EndpointConfig,
    only: Option<&str>,
) -> GxrResult<()> {
    let ctx = UiContext::detect();
    let client = create_client(endpoint).await;
    let cache = open_cache(config)?;
    let repos = RepoManager::new(&client, &cache);

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Refreshing repository roots...");
    let refreshed = match repos.update_cache(&config.repos, only).await {
        Ok(refreshed) => refreshed,
        Err(e) => {
            spinner.stop_error("Refresh failed");
            return Err(e);
        }
    };
    spinner.stop(&format!("Refreshed {} repositories", refreshed.len()));

    if refreshed.is_empty() {
        ui::step_info(&ctx, "No mutable repository roots to refresh");
    }
    for entry in &refreshed {
        ui::step_ok_detail(&ctx, &format!("{} ({})", entry.name, entry.root), &entry.identifier);
    }

    Ok(())
}
