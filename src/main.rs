//! gxr - package repositories on IPFS
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use gxr::cli::{Cli, Commands};
use gxr::config::{Config, ConfigManager};
use gxr::error::GxrResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> GxrResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions(args) = cli.command {
        gxr::cli::commands::completions(args);
        return Ok(());
    }

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = manager.load().await?;

    init_logging(cli.verbose, &config);
    gxr::ui::init_theme();

    let endpoint = cli.endpoint_config(&config);

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Repo(args) => gxr::cli::commands::repo(args, &config, &manager, &endpoint).await,
        Commands::Resolve(args) => gxr::cli::commands::resolve(args, &config, &endpoint).await,
        Commands::Cache(args) => gxr::cli::commands::cache(args, &config).await,
        Commands::Config(args) => gxr::cli::commands::config(args, &config, &manager),
    }
}

/// Logs go to stderr: 0 = warn, 1 = info, 2+ = debug. RUST_LOG wins when set.
fn init_logging(verbose: u8, config: &Config) {
    let default = match verbose {
        0 => "gxr=warn",
        1 => "gxr=info",
        _ => "gxr=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
