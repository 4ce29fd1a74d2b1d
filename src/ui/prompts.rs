//! Confirmation prompts with a non-interactive fallback

use super::context::UiContext;
use crate::error::{GxrError, GxrResult};

/// Ask a yes/no question.
///
/// `--yes` answers yes; without a terminal the default is returned.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> GxrResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on terminal input
    let message = message.to_string();
    let answer = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| GxrError::Internal(format!("Prompt task failed: {}", e)))?;

    answer.map_err(|e| GxrError::io("reading confirmation", e))
}
