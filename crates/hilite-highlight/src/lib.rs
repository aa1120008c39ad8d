//! Styled-run decoding for hilite.
//!
//! A highlight.js-compatible tokenizer turns source code into HTML where
//! every token is wrapped in `<span class="hljs-...">`. This crate turns that
//! HTML into a flat list of [`StyledRun`]s, each carrying the font and colors
//! a [`Theme`](hilite_theme::Theme) assigns to the open classes.
//!
//! # Architecture
//!
//! The crate is built around one function and two boundary traits:
//!
//! - [`decode`]: a single forward pass over tokenizer HTML, with a
//!   [`ScopeStack`] tracking open spans and an entity pass at the end
//! - [`Tokenizer`]: what produces the HTML (a black box to this crate)
//! - [`HtmlRenderer`]: a host-supplied generic HTML converter, used instead
//!   of [`decode`] when the caller asks for the slower, CSS-faithful path
//!
//! Finished runs can be post-processed with [`add_line_numbers`] and written
//! to a terminal with [`runs_to_ansi`].
//!
//! # Quick Start
//!
//! ```rust
//! use hilite_highlight::{decode, plain_text};
//! use hilite_theme::{GenericFonts, Theme};
//!
//! let theme = Theme::build("t", ".hljs-keyword{font-weight:bold}", None, &GenericFonts)?;
//! let runs = decode(r#"<span class="hljs-keyword">fn</span> main() -&gt; ()"#, &theme);
//! assert_eq!(plain_text(&runs), "fn main() -> ()");
//! assert!(runs[0].style.font.is_bold());
//! # Ok::<(), hilite_theme::ThemeError>(())
//! ```

mod ansi;
mod cursor;
mod decode;
mod entities;
mod lines;
mod run;
mod scope;

pub use ansi::{AnsiOptions, runs_to_ansi};
pub use decode::{decode, html_document};
pub use entities::decode_entities;
pub use lines::{LineNumberConfig, add_line_numbers};
pub use run::{StyledRun, plain_text};
pub use scope::ScopeStack;

// Re-export theme types for convenience
pub use hilite_theme::{Color, Font, FontFace, Style, Theme};

/// The tokenizer's own "no result" signal, returned as regular output.
pub const UNDEFINED_OUTPUT: &str = "undefined";

/// Errors reported by a [`Tokenizer`].
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// The tokenizer has no grammar with this name.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    /// The tokenizer gave up, or signalled failure through its output.
    #[error("tokenizer failed: {0}")]
    Failed(String),
}

/// A source of highlight.js-style HTML.
///
/// Implementations wrap an actual tokenizer (an embedded script engine, a
/// subprocess, a service). The returned HTML must escape `<`, `>` and `&`
/// in token text and only use `<span class="...">` / `</span>` as markup.
pub trait Tokenizer {
    /// Tokenize `code`. `None` asks the tokenizer to detect the language.
    fn tokenize(
        &self,
        code: &str,
        language: Option<&str>,
        ignore_illegals: bool,
    ) -> Result<String, TokenizeError>;

    /// Names of the languages this tokenizer supports.
    fn languages(&self) -> Vec<String>;
}

/// A generic HTML-to-styled-text converter supplied by the host toolkit.
pub trait HtmlRenderer {
    /// Render a complete document as built by [`html_document`]. Returns
    /// `None` when the document could not be rendered.
    fn render(&self, document: &str) -> Option<Vec<StyledRun>>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(
        &self,
        code: &str,
        language: Option<&str>,
        ignore_illegals: bool,
    ) -> Result<String, TokenizeError> {
        (**self).tokenize(code, language, ignore_illegals)
    }

    fn languages(&self) -> Vec<String> {
        (**self).languages()
    }
}

/// Run a tokenizer and fold its `"undefined"` output into an error, so
/// callers only have one failure shape to handle.
pub fn tokenize_checked(
    tokenizer: &dyn Tokenizer,
    code: &str,
    language: Option<&str>,
    ignore_illegals: bool,
) -> Result<String, TokenizeError> {
    let html = tokenizer.tokenize(code, language, ignore_illegals)?;
    if html == UNDEFINED_OUTPUT {
        return Err(TokenizeError::Failed(format!(
            "no output for language {}",
            language.unwrap_or("(auto)")
        )));
    }
    Ok(html)
}
