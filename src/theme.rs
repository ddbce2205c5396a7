//! Terminal styling for ecs-trace output.
//!
//! Styling is an explicit [`Theme`] value built from configuration and
//! passed into the menus, the trace progress output, and the pager. There
//! is no process-wide style state, and a disabled theme renders plain
//! text, so output formatting is testable without a live terminal.

use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
}

/// Per-role color names, configurable in the `[ui.colors]` section.
///
/// Names are parsed by [`parse_color`]; an unrecognized name falls back to
/// the preset's color for that role.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeColors {
    /// Column header row
    #[serde(default)]
    pub header: Option<String>,

    /// Event timestamps
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Event source labels
    #[serde(default)]
    pub source: Option<String>,

    /// Menu numbering and prompts
    #[serde(default)]
    pub accent: Option<String>,

    /// Progress and paging chrome
    #[serde(default)]
    pub muted: Option<String>,

    /// Selection confirmations and informational notices
    #[serde(default)]
    pub notice: Option<String>,

    /// Non-fatal error reports
    #[serde(default)]
    pub error: Option<String>,
}

/// Resolved colors for every output role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Whether ANSI styling is emitted at all
    pub enabled: bool,
    pub header: Color,
    pub timestamp: Color,
    pub source: Color,
    pub accent: Color,
    pub muted: Color,
    pub notice: Color,
    pub error: Color,
}

impl Theme {
    /// Dark preset colors.
    pub fn dark() -> Self {
        Self {
            enabled: true,
            header: Color::Cyan,
            timestamp: Color::White,
            source: Color::Cyan,
            accent: Color::Green,
            muted: Color::DarkGrey,
            notice: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Light preset colors.
    pub fn light() -> Self {
        Self {
            enabled: true,
            header: Color::DarkBlue,
            timestamp: Color::Black,
            source: Color::DarkBlue,
            accent: Color::DarkGreen,
            muted: Color::Grey,
            notice: Color::DarkYellow,
            error: Color::DarkRed,
        }
    }

    /// A theme that emits no styling. Used when stdout is not a terminal
    /// and in tests.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::dark()
        }
    }

    /// Builds a theme from the configured preset and color overrides.
    ///
    /// `enabled` should be false when stdout is not a terminal so piped
    /// output stays free of escape sequences.
    pub fn from_config(preset: &ThemePreset, colors: &ThemeColors, enabled: bool) -> Self {
        let base = match preset {
            ThemePreset::Dark => Self::dark(),
            ThemePreset::Light => Self::light(),
        };
        let pick = |name: &Option<String>, fallback: Color| {
            name.as_deref().and_then(parse_color).unwrap_or(fallback)
        };
        Self {
            enabled,
            header: pick(&colors.header, base.header),
            timestamp: pick(&colors.timestamp, base.timestamp),
            source: pick(&colors.source, base.source),
            accent: pick(&colors.accent, base.accent),
            muted: pick(&colors.muted, base.muted),
            notice: pick(&colors.notice, base.notice),
            error: pick(&colors.error, base.error),
        }
    }

    /// Applies a color to text, or returns it unchanged when styling is off.
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Like [`Self::paint`] but bold. Used for the pager header row.
    pub fn paint_bold(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Maps a color name from the config file to a terminal color.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}
