//! Test harness for hilite.
//!
//! This crate provides stand-ins for the collaborators hilite talks to, and
//! a sample runner for decoder fixtures:
//!
//! - [`MockTokenizer`]: canned tokenizer output per language
//! - [`RecordingRenderer`]: an [`HtmlRenderer`] that records the documents it gets
//! - [`FIXTURE_THEMES`]: small, predictable theme stylesheets
//! - [`test_samples`]: decodes every `samples/*.html` and compares the
//!   text with the matching `samples/*.txt`
//!
//! # Usage
//!
//! ```ignore
//! #[test]
//! fn test_samples() {
//!     hilite_test_harness::test_samples(&theme, env!("CARGO_MANIFEST_DIR"));
//! }
//! ```

pub use hilite_highlight;
pub use hilite_highlight::plain_text;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use hilite_highlight::{HtmlRenderer, StyledRun, TokenizeError, Tokenizer, UNDEFINED_OUTPUT, decode};
use hilite_theme::{Color, Theme};

/// A light theme: every recognized property, one class each.
pub const LIGHT_THEME: &str = "\
.hljs{background:#ffffff;color:#000000}\
.hljs-keyword{color:#0000ff;font-weight:bold}\
.hljs-string{color:#ff0000}\
.hljs-comment{color:#808080;font-style:italic}\
.hljs-subst{background-color:#eeeeee}";

/// A dark theme with the same classes as [`LIGHT_THEME`].
pub const DARK_THEME: &str = "\
.hljs{background-color:#000000;color:#ffffff}\
.hljs-keyword{color:#8888ff;font-weight:700}\
.hljs-string{color:#ff8888}\
.hljs-comment{color:#888888;font-style:oblique}";

/// Fixture themes by name.
pub const FIXTURE_THEMES: &[(&str, &str)] = &[("default", LIGHT_THEME), ("light", LIGHT_THEME), ("dark", DARK_THEME)];

/// Escape text the way a tokenizer escapes token text.
pub fn escape_html(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// One recorded call to [`MockTokenizer::tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeCall {
    pub code: String,
    pub language: Option<String>,
    pub ignore_illegals: bool,
}

/// A tokenizer with canned output.
///
/// Known languages return the HTML registered for the code, or the escaped
/// code when nothing is registered. Clones share the call log.
#[derive(Debug, Clone, Default)]
pub struct MockTokenizer {
    languages: Vec<String>,
    outputs: HashMap<String, String>,
    calls: Arc<Mutex<Vec<TokenizeCall>>>,
}

impl MockTokenizer {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Return `html` whenever `code` is tokenized.
    pub fn with_output(mut self, code: impl Into<String>, html: impl Into<String>) -> Self {
        self.outputs.insert(code.into(), html.into());
        self
    }

    /// Make `code` produce the tokenizer's `"undefined"` signal.
    pub fn with_undefined(self, code: impl Into<String>) -> Self {
        self.with_output(code, UNDEFINED_OUTPUT)
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<TokenizeCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Tokenizer for MockTokenizer {
    fn tokenize(
        &self,
        code: &str,
        language: Option<&str>,
        ignore_illegals: bool,
    ) -> Result<String, TokenizeError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TokenizeCall {
                code: code.to_string(),
                language: language.map(str::to_string),
                ignore_illegals,
            });

        if let Some(language) = language {
            if !self.languages.iter().any(|l| l == language) {
                return Err(TokenizeError::UnsupportedLanguage(language.to_string()));
            }
        }
        Ok(self
            .outputs
            .get(code)
            .cloned()
            .unwrap_or_else(|| escape_html(code)))
    }

    fn languages(&self) -> Vec<String> {
        self.languages.clone()
    }
}

/// An [`HtmlRenderer`] that records every document and answers with fixed
/// runs, or with nothing when built by [`RecordingRenderer::failing`].
/// Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    output: Option<Vec<StyledRun>>,
    documents: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    pub fn returning(runs: Vec<StyledRun>) -> Self {
        Self {
            output: Some(runs),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Documents rendered so far, oldest first.
    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl HtmlRenderer for RecordingRenderer {
    fn render(&self, document: &str) -> Option<Vec<StyledRun>> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(document.to_string());
        self.output.clone()
    }
}

/// Whether two colors match to within 8-bit rounding.
pub fn approx_eq(a: Color, b: Color) -> bool {
    const EPSILON: f32 = 0.5 / 255.0;
    (a.r - b.r).abs() <= EPSILON
        && (a.g - b.g).abs() <= EPSILON
        && (a.b - b.b).abs() <= EPSILON
        && (a.a - b.a).abs() <= EPSILON
}

/// The text of every run, in order.
pub fn texts(runs: &[StyledRun]) -> Vec<&str> {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// The first run with exactly this text.
pub fn find_run<'r>(runs: &'r [StyledRun], text: &str) -> Option<&'r StyledRun> {
    runs.iter().find(|run| run.text == text)
}

/// Decodes every `samples/*.html` under `crate_dir` with `theme` and checks
/// that the text matches the sibling `.txt` file.
///
/// # Panics
///
/// Panics if a sample's text differs, a `.txt` file is missing, a decoded
/// run is empty, or no samples are found.
pub fn test_samples(theme: &Theme, crate_dir: &str) {
    let samples_dir = Path::new(crate_dir).join("samples");
    let entries = fs::read_dir(&samples_dir)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", samples_dir.display()));

    let mut count = 0;
    for entry in entries {
        let path = entry.expect("Failed to read directory entry").path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }

        let html = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        let expected_path = path.with_extension("txt");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", expected_path.display()));

        let runs = decode(&html, theme);
        assert!(
            runs.iter().all(|run| !run.text.is_empty()),
            "{}: decoder emitted an empty run",
            path.display()
        );
        assert_eq!(
            plain_text(&runs),
            expected,
            "{}: decoded text differs from {}",
            path.display(),
            expected_path.display()
        );
        count += 1;
    }

    assert!(count > 0, "No samples found in {}", samples_dir.display());
}
