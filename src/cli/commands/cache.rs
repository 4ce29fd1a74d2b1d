//! Cache command - inspect or clear the resolution cache

use super::{open_cache, print_map};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::GxrResult;
use crate::ui::{self, UiContext};

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> GxrResult<()> {
    let cache = open_cache(config)?;

    match args.action {
        CacheAction::Ls { format } => {
            let ctx = UiContext::detect();
            let entries = cache.entries().await?;

            if entries.is_empty() && format == OutputFormat::Table {
                ui::step_info(&ctx, "Resolution cache is empty");
                return Ok(());
            }
            print_map(&ctx, &entries, format, ("PATH", "RESOLVED"))
        }
        CacheAction::Clear { yes } => {
            let ctx = UiContext::detect().with_auto_yes(yes);
            let prompt = format!("Delete resolution cache at {}?", cache.path().display());

            if !ui::confirm(&ctx, &prompt, false).await? {
                ui::remark(&ctx, "Cache left untouched (pass --yes to skip this prompt)");
                return Ok(());
            }

            if cache.clear().await? {
                ui::step_ok_detail(&ctx, "Removed", &cache.path().display().to_string());
            } else {
                ui::step_info(&ctx, "Resolution cache is already empty");
            }
            Ok(())
        }
        CacheAction::Path => {
            println!("{}", cache.path().display());
            Ok(())
        }
    }
}
