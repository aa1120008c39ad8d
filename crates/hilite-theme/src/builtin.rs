//! Themes compiled into the crate.

/// Light theme, applied when nothing else is asked for.
pub const DEFAULT: &str = include_str!("../themes/default.css");

/// Dark theme.
pub const DARK: &str = include_str!("../themes/dark.css");

const ALL: &[(&str, &str)] = &[("default", DEFAULT), ("dark", DARK)];

/// Stylesheet source of a built-in theme.
pub fn get(name: &str) -> Option<&'static str> {
    ALL.iter().find(|(n, _)| *n == name).map(|(_, css)| *css)
}

/// Names of all built-in themes.
pub fn names() -> impl Iterator<Item = &'static str> {
    ALL.iter().map(|(name, _)| *name)
}
