//! Terminal output for gxr commands
//!
//! Interactive terminals get `cliclack` log lines, spinners and an
//! `indicatif` bar for repository queries. Pipes and CI get plain,
//! prefix-tagged lines instead.
//!
//! Machine-readable formats (`--format json|plain`) bypass this module and
//! print directly, so nothing here ever mixes into parseable output.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{key_value, remark, step_info, step_ok_detail, step_warn};
pub use progress::{QueryProgress, TaskSpinner};
pub use prompts::confirm;
pub use theme::{init_theme, GxrTheme};
