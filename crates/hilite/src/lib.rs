//! Themed syntax highlighting as styled text runs.
//!
//! hilite takes the HTML a highlight.js-compatible tokenizer produces for a
//! piece of source code and turns it into a list of [`StyledRun`]s: pieces
//! of text with a font, a foreground and a background color, ready to be
//! turned into whatever rich-text type the host uses.
//!
//! The tokenizer itself is not part of hilite; plug one in through the
//! [`Tokenizer`] trait. Themes are plain highlight.js CSS files, loaded
//! through a [`ThemeSource`].
//!
//! # Pipeline
//!
//! 1. The theme stylesheet is scanned once into a [`Theme`]
//! 2. The tokenizer turns code into `<span class="hljs-...">` HTML
//! 3. [`decode`] walks the HTML once and emits styled runs
//! 4. Optionally, [`add_line_numbers`] prefixes every line with its number
//!
//! # Configuration
//!
//! [`Config`] holds the theme name, font, rendering path and line numbering,
//! and can be loaded from TOML with [`Config::load`].

mod config;
mod error;
mod highlighter;
mod themes;

pub use config::{Config, DEFAULT_THEME};
pub use error::Error;
pub use highlighter::Highlighter;
pub use themes::{BuiltinThemes, DirectoryThemes, LayeredThemes, MemoryThemes, ThemeSource};

// Re-export the building blocks so most users only depend on this crate.
pub use hilite_highlight::{
    AnsiOptions, HtmlRenderer, LineNumberConfig, ScopeStack, StyledRun, TokenizeError, Tokenizer,
    add_line_numbers, decode, html_document, plain_text, runs_to_ansi,
};
pub use hilite_theme::{
    ClassStyle, Color, Font, FontFace, FontResolver, FontSet, FontSpec, FontVariant, GenericFonts,
    Style, Stylesheet, Theme, ThemeError,
};

/// Theme support crate.
pub use hilite_theme as theme;
