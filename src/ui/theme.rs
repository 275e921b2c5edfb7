//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML palettes of hex colors. Two Catppuccin variants are compiled in;
//! any other palette can be loaded from a file with [`Theme::from_file`].
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme (default)
//! - `catppuccin-latte`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! accent = "#89b4fa"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! card_border = "#585b70"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! overlay_border = "#b4befe"
//! notice_info = "#94e2d5"
//! notice_warning = "#f9e2af"
//! notice_error = "#f38ba8"
//! # optional: header_bg, overlay_bg
//! ```

use crate::domain::{ReelfinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focused card and tile colors.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary card lines, hints.
    pub text_dim: String,
    /// Spinner glyphs, kind filter label, overlay field labels.
    pub accent: String,

    pub border: String,
    pub search_bar_border: String,
    pub card_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub overlay_border: String,
    #[serde(default)]
    pub overlay_bg: Option<String>,

    pub notice_info: String,
    pub notice_warning: String,
    pub notice_error: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// ```rust
    /// use reelfinder::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme_name = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Theme`] if the file cannot be read or is not a valid
    /// theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ReelfinderError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ReelfinderError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Plain palette used only if the compiled-in default cannot be parsed.
    fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: c("#ffffff"),
                header_bg: None,
                selection_fg: c("#000000"),
                selection_bg: c("#ffffff"),
                text_normal: c("#d0d0d0"),
                text_dim: c("#808080"),
                accent: c("#5f87ff"),
                border: c("#606060"),
                search_bar_border: c("#d0d0d0"),
                card_border: c("#606060"),
                match_highlight_fg: c("#000000"),
                match_highlight_bg: c("#ffd700"),
                empty_state_fg: c("#5f87ff"),
                overlay_border: c("#d0d0d0"),
                overlay_bg: None,
                notice_info: c("#5fd7af"),
                notice_warning: c("#ffd700"),
                notice_error: c("#ff5f5f"),
            },
        }
    }

    /// Converts a hex color to an RGB tuple. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}
