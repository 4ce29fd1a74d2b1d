//! Status lines shared by all commands

use super::context::UiContext;
use console::style;

/// Display a completed step with a dimmed detail, such as an identifier
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} {}", message, style(detail).dim())).ok();
    } else {
        println!("{} {} {}", style("[OK]").green(), message, detail);
    }
}

/// Display an informational line
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        println!("{} {}", style("[INFO]").cyan(), message);
    }
}

/// Display a warning line
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        println!("{} {}", style("[WARN]").yellow(), message);
    }
}

/// Display a dimmed hint
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print an aligned key/value row
pub fn key_value(ctx: &UiContext, key: &str, value: &str, width: usize) {
    if ctx.use_fancy_output() {
        println!("{:<width$}  {}", style(key).cyan(), value);
    } else {
        println!("{:<width$}  {}", key, value);
    }
}
