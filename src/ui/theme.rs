//! cliclack theme

use cliclack::ThemeState;
use console::Style;

/// Cyan bars, green on submit
#[derive(Debug, Clone, Default)]
pub struct GxrTheme;

impl cliclack::Theme for GxrTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Active | ThemeState::Submit => Style::new().cyan(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

/// Install the theme for every prompt and log line
pub fn init_theme() {
    cliclack::set_theme(GxrTheme);
}
