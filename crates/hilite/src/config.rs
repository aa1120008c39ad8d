//! Highlighter configuration, loadable from TOML.
//!
//! ```toml
//! theme = "dark"
//! fast_render = true
//! ignore_illegals = false
//!
//! [font]
//! family = "Menlo"
//! size = 13.0
//!
//! [line_numbers]
//! start = 1
//! min_width = 3
//! separator = " | "
//! dark = true
//! ```

use std::fs;
use std::path::Path;

use hilite_highlight::LineNumberConfig;
use hilite_theme::FontSpec;
use serde::Deserialize;

use crate::error::Error;

/// Theme applied when nothing else is asked for.
pub const DEFAULT_THEME: &str = "default";

/// Configuration for a [`Highlighter`](crate::Highlighter).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    /// Name of the theme to apply.
    pub theme: String,
    /// Decode tokenizer output directly (true) or hand it to the host's
    /// HTML renderer (false).
    pub fast_render: bool,
    /// Ask the tokenizer to keep going past illegal syntax.
    pub ignore_illegals: bool,
    /// Code font; `None` uses the default font.
    pub font: Option<FontSpec>,
    /// Number lines of every highlight; `None` leaves output unnumbered.
    pub line_numbers: Option<LineNumberConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            fast_render: true,
            ignore_illegals: false,
            font: None,
            line_numbers: None,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// On-disk shape of [`Config`].
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    theme: String,
    fast_render: bool,
    ignore_illegals: bool,
    font: Option<FontSpec>,
    line_numbers: Option<LineNumbersSection>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = Config::default();
        Self {
            theme: config.theme,
            fast_render: config.fast_render,
            ignore_illegals: config.ignore_illegals,
            font: None,
            line_numbers: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LineNumbersSection {
    start: i64,
    min_width: usize,
    separator: String,
    line_break: String,
    dark: bool,
    font_size: f32,
}

impl Default for LineNumbersSection {
    fn default() -> Self {
        let defaults = LineNumberConfig::default();
        Self {
            start: 1,
            min_width: defaults.min_width(),
            separator: defaults.separator().to_string(),
            line_break: defaults.line_break().to_string(),
            dark: defaults.dark(),
            font_size: defaults.font_size(),
        }
    }
}

impl From<LineNumbersSection> for LineNumberConfig {
    fn from(section: LineNumbersSection) -> Self {
        LineNumberConfig::new()
            .with_start(section.start)
            .with_min_width(section.min_width)
            .with_separator(section.separator)
            .with_line_break(section.line_break)
            .with_dark(section.dark)
            .with_font_size(section.font_size)
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            theme: file.theme,
            fast_render: file.fast_render,
            ignore_illegals: file.ignore_illegals,
            font: file.font,
            line_numbers: file.line_numbers.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml_str(indoc! {r#"
            theme = "dark"
            fast_render = false
            ignore_illegals = true

            [font]
            family = "Menlo"
            size = 13.0

            [line_numbers]
            start = 10
            min_width = 3
            separator = " | "
            dark = true
        "#})
        .unwrap();

        assert_eq!(config.theme, "dark");
        assert!(!config.fast_render);
        assert!(config.ignore_illegals);
        assert_eq!(config.font, Some(FontSpec::new("Menlo", 13.0)));

        let numbers = config.line_numbers.unwrap();
        assert_eq!(numbers.start(), 10);
        assert_eq!(numbers.min_width(), 3);
        assert_eq!(numbers.separator(), " | ");
        assert_eq!(numbers.line_break(), "\n");
        assert!(numbers.dark());
        assert_eq!(numbers.font_size(), 16.0);
    }

    #[test]
    fn test_line_numbers_are_clamped() {
        let config = Config::from_toml_str(indoc! {r#"
            [line_numbers]
            start = -3
            min_width = 1
            separator = ""
        "#})
        .unwrap();
        let numbers = config.line_numbers.unwrap();
        assert_eq!(numbers.start(), 1);
        assert_eq!(numbers.min_width(), 2);
        assert_eq!(numbers.separator(), "  ");
    }

    #[test]
    fn test_font_defaults_fill_in() {
        let config = Config::from_toml_str("[font]\nfamily = \"Iosevka\"").unwrap();
        assert_eq!(config.font, Some(FontSpec::new("Iosevka", 14.0)));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let err = Config::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/hilite.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
