//! High-level highlighting API.
//!
//! A [`Highlighter`] owns the collaborators (tokenizer, theme source, font
//! resolver and optionally a host HTML renderer) and the currently applied
//! theme. Themes are built once per change and shared as `Arc<Theme>`, so a
//! theme handed out to an observer or returned from
//! [`set_theme`](Highlighter::set_theme) stays valid after later changes.

use std::sync::Arc;

use hilite_highlight::{
    HtmlRenderer, LineNumberConfig, StyledRun, TokenizeError, Tokenizer, add_line_numbers, decode,
    html_document, tokenize_checked,
};
use hilite_theme::{FontResolver, FontSpec, Theme};
use tracing::debug;

use crate::Config;
use crate::error::Error;
use crate::themes::ThemeSource;

type ThemeObserver = Box<dyn Fn(&Theme)>;

/// Turns source code into styled runs.
///
/// ```rust
/// use hilite::{BuiltinThemes, GenericFonts, Highlighter, TokenizeError, Tokenizer};
///
/// struct Plain;
///
/// impl Tokenizer for Plain {
///     fn tokenize(&self, code: &str, _: Option<&str>, _: bool) -> Result<String, TokenizeError> {
///         Ok(code.replace('&', "&amp;").replace('<', "&lt;"))
///     }
///
///     fn languages(&self) -> Vec<String> {
///         vec!["plaintext".into()]
///     }
/// }
///
/// let highlighter = Highlighter::new(Plain, BuiltinThemes, GenericFonts)?;
/// let runs = highlighter.highlight("a < b", Some("plaintext"))?;
/// assert_eq!(hilite::plain_text(&runs), "a < b");
/// # Ok::<(), hilite::Error>(())
/// ```
pub struct Highlighter {
    tokenizer: Box<dyn Tokenizer>,
    themes: Box<dyn ThemeSource>,
    fonts: Box<dyn FontResolver>,
    renderer: Option<Box<dyn HtmlRenderer>>,
    config: Config,
    theme: Arc<Theme>,
    observers: Vec<ThemeObserver>,
}

impl Highlighter {
    /// Create a highlighter with the default configuration, applying the
    /// `default` theme.
    pub fn new(
        tokenizer: impl Tokenizer + 'static,
        themes: impl ThemeSource + 'static,
        fonts: impl FontResolver + 'static,
    ) -> Result<Self, Error> {
        Self::with_config(tokenizer, themes, fonts, Config::default())
    }

    /// Create a highlighter, applying the configured theme and font.
    pub fn with_config(
        tokenizer: impl Tokenizer + 'static,
        themes: impl ThemeSource + 'static,
        fonts: impl FontResolver + 'static,
        config: Config,
    ) -> Result<Self, Error> {
        let theme = build_theme(&themes, &fonts, &config.theme, config.font.as_ref())?;
        Ok(Self {
            tokenizer: Box::new(tokenizer),
            themes: Box::new(themes),
            fonts: Box::new(fonts),
            renderer: None,
            config,
            theme: Arc::new(theme),
            observers: Vec::new(),
        })
    }

    /// Install the host's HTML renderer, used when fast rendering is off.
    pub fn with_renderer(mut self, renderer: impl HtmlRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Choose between decoding tokenizer output directly (the default) and
    /// handing it to the HTML renderer.
    pub fn set_fast_render(&mut self, fast: bool) {
        self.config.fast_render = fast;
    }

    pub fn set_ignore_illegals(&mut self, ignore: bool) {
        self.config.ignore_illegals = ignore;
    }

    /// Line numbering applied by [`highlight`](Self::highlight).
    pub fn set_line_numbers(&mut self, line_numbers: Option<LineNumberConfig>) {
        self.config.line_numbers = line_numbers;
    }

    /// The theme currently applied.
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Call `observer` with the new theme after every successful theme or
    /// font change.
    pub fn on_theme_change(&mut self, observer: impl Fn(&Theme) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply a theme by name, keeping the current font.
    ///
    /// On failure the current theme stays applied.
    pub fn set_theme(&mut self, name: &str) -> Result<Arc<Theme>, Error> {
        let font = self.config.font.clone();
        self.apply_theme(name, font)
    }

    /// Apply a theme by name with a new font.
    pub fn set_theme_with_font(&mut self, name: &str, font: FontSpec) -> Result<Arc<Theme>, Error> {
        self.apply_theme(name, Some(font))
    }

    /// Keep the current theme but change the font.
    pub fn set_font(&mut self, font: FontSpec) -> Result<Arc<Theme>, Error> {
        let theme = self.theme.with_font(Some(&font), self.fonts.as_ref())?;
        self.config.font = Some(font);
        Ok(self.install(theme))
    }

    fn apply_theme(&mut self, name: &str, font: Option<FontSpec>) -> Result<Arc<Theme>, Error> {
        let theme = build_theme(self.themes.as_ref(), self.fonts.as_ref(), name, font.as_ref())?;
        self.config.theme = name.to_string();
        self.config.font = font;
        Ok(self.install(theme))
    }

    fn install(&mut self, theme: Theme) -> Arc<Theme> {
        debug!(theme = theme.name(), font = %theme.fonts().base.family, "theme changed");
        let theme = Arc::new(theme);
        self.theme = Arc::clone(&theme);
        for observer in &self.observers {
            observer(&theme);
        }
        theme
    }

    /// Highlight `code`, numbering lines if the configuration asks for it.
    /// `None` lets the tokenizer detect the language.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> Result<Vec<StyledRun>, Error> {
        self.highlight_with_line_numbers(code, language, self.config.line_numbers.as_ref())
    }

    /// Highlight `code` with explicit line numbering. Passing `None` gives
    /// exactly the unnumbered output.
    pub fn highlight_with_line_numbers(
        &self,
        code: &str,
        language: Option<&str>,
        line_numbers: Option<&LineNumberConfig>,
    ) -> Result<Vec<StyledRun>, Error> {
        let html = tokenize_checked(
            self.tokenizer.as_ref(),
            code,
            language,
            self.config.ignore_illegals,
        )
        .map_err(|err| match err {
            TokenizeError::UnsupportedLanguage(language) => Error::UnsupportedLanguage { language },
            TokenizeError::Failed(message) => Error::Tokenizer {
                language: language.unwrap_or("auto").to_string(),
                message,
            },
        })?;

        let runs = if self.config.fast_render {
            decode(&html, &self.theme)
        } else {
            let renderer = self.renderer.as_ref().ok_or(Error::RendererUnavailable)?;
            renderer
                .render(&html_document(&self.theme, &html))
                .ok_or(Error::RenderFailed)?
        };

        Ok(match line_numbers {
            Some(config) => add_line_numbers(&runs, config),
            None => runs,
        })
    }

    /// Names of all themes the theme source offers.
    pub fn available_themes(&self) -> Vec<String> {
        self.themes.names()
    }

    /// Names of all languages the tokenizer supports.
    pub fn supported_languages(&self) -> Vec<String> {
        self.tokenizer.languages()
    }
}

fn build_theme(
    themes: &dyn ThemeSource,
    fonts: &dyn FontResolver,
    name: &str,
    font: Option<&FontSpec>,
) -> Result<Theme, Error> {
    let source = themes.load(name).ok_or_else(|| Error::UnknownTheme {
        name: name.to_string(),
    })?;
    Ok(Theme::build(name, &source, font, fonts)?)
}
