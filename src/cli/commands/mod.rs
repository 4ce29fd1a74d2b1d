//! CLI command implementations

pub mod cache;
pub mod completions;
pub mod config;
pub mod repo;
pub mod resolve;

pub use cache::execute as cache;
pub use completions::execute as completions;
pub use config::execute as config;
pub use repo::execute as repo;
pub use resolve::execute as resolve;

use crate::cache::ResolutionCache;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::GxrResult;
use crate::ui::{self, UiContext};
use console::style;
use std::collections::BTreeMap;

/// Open the resolution cache configured for this run
pub(crate) fn open_cache(config: &Config) -> GxrResult<ResolutionCache> {
    match config.cache.path {
        Some(ref path) => Ok(ResolutionCache::new(path.clone())),
        None => ResolutionCache::open_default(),
    }
}

/// Print name/value rows in the requested format
pub(crate) fn print_map(
    ctx: &UiContext,
    rows: &BTreeMap<String, String>,
    format: OutputFormat,
    headers: (&str, &str),
) -> GxrResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Plain => {
            for (key, value) in rows {
                println!("{}\t{}", key, value);
            }
        }
        OutputFormat::Table => {
            let width = rows
                .keys()
                .map(|k| k.len())
                .max()
                .unwrap_or(0)
                .max(headers.0.len());
            println!(
                "{:<width$}  {}",
                style(headers.0).bold(),
                style(headers.1).bold()
            );
            for (key, value) in rows {
                ui::key_value(ctx, key, value, width);
            }
        }
    }
    Ok(())
}
