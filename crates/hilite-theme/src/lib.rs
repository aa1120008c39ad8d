//! Theme support for hilite.
//!
//! This crate provides:
//! - Stylesheet scanning for highlight.js-style theme CSS ([`Stylesheet`])
//! - Color decoding from CSS color values ([`Color::from_css`])
//! - Code font resolution with bold and italic variants ([`FontSet`])
//! - Resolved, immutable themes ([`Theme`])
//! - Built-in themes ([`builtin`])
//!
//! ```rust
//! use hilite_theme::{GenericFonts, Theme};
//!
//! let theme = Theme::build("mini", ".hljs{background:#000}.hljs-keyword{color:#f00}", None, &GenericFonts)?;
//! let style = theme.style_for(["hljs", "hljs-keyword"]);
//! assert_eq!(style.foreground, Some(hilite_theme::Color::rgb(1.0, 0.0, 0.0)));
//! # Ok::<(), hilite_theme::ThemeError>(())
//! ```

pub mod builtin;
mod color;
mod css;
mod error;
mod font;
mod theme;

pub use color::Color;
pub use css::{BASE_SCOPE, Declarations, Stylesheet};
pub use error::ThemeError;
pub use font::{
    DEFAULT_FAMILY, DEFAULT_SIZE, Font, FontFace, FontResolver, FontSet, FontSpec, FontVariant,
    GenericFonts, MONOSPACE_FAMILY,
};
pub use theme::{ClassStyle, Style, Theme};
