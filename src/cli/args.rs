//! CLI argument definitions using clap derive

use crate::config::Config;
use crate::endpoint::EndpointConfig;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// gxr - package repositories on IPFS
///
/// Resolves repository roots published under IPFS/IPNS, caches the
/// resolutions, and finds which repositories provide a package.
#[derive(Parser, Debug)]
#[command(name = "gxr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GXR_CONFIG")]
    pub config: Option<PathBuf>,

    /// IPFS API endpoint (host:port or URL); skips local node discovery
    #[arg(long, global = true, env = "IPFS_API")]
    pub api: Option<String>,

    /// IPFS node directory containing the `api` file
    #[arg(long, global = true, env = "IPFS_PATH")]
    pub ipfs_path: Option<PathBuf>,
}

impl Cli {
    /// Endpoint options: flags and environment first, then the config file
    pub fn endpoint_config(&self, config: &Config) -> EndpointConfig {
        EndpointConfig {
            api_endpoint: self
                .api
                .clone()
                .filter(|a| !a.is_empty())
                .or_else(|| config.endpoint.api.clone()),
            node_runtime_dir: self
                .ipfs_path
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .or_else(|| config.endpoint.ipfs_path.clone()),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage and query package repositories
    Repo(RepoArgs),

    /// Resolve a path to a content identifier
    Resolve(ResolveArgs),

    /// Inspect or clear the resolution cache
    Cache(CacheArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the repo command
#[derive(Parser, Debug)]
pub struct RepoArgs {
    #[command(subcommand)]
    pub action: RepoAction,
}

/// Repo subcommands
#[derive(Subcommand, Debug)]
pub enum RepoAction {
    /// Register a repository
    Add {
        /// Display name
        name: String,
        /// Root path: /ipns/<key>, /ipfs/<hash> or a bare hash
        path: String,
    },

    /// Unregister a repository
    Rm {
        /// Display name
        name: String,
    },

    /// Show registered repositories
    Ls {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the packages a repository publishes
    List {
        /// Display name
        name: String,

        /// Resolve the root again instead of using the cache
        #[arg(long)]
        no_cache: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Find repositories that publish a package
    Query {
        /// Package name
        package: String,

        /// Repositories fetched concurrently (default: from config)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Re-resolve mutable repository roots and refresh the cache
    #[command(name = "updatecache")]
    UpdateCache {
        /// Only refresh this repository
        name: Option<String>,
    },
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path to resolve, e.g. /ipns/<key>
    pub path: String,

    /// Skip the cache lookup (the result is still cached)
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cached resolutions
    Ls {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete the cache file
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show cache file path
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON object
    Json,
    /// Tab-separated, one entry per line
    Plain,
}
