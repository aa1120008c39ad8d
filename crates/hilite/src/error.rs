use hilite_theme::ThemeError;

/// Errors that can occur while highlighting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tokenizer does not know the requested language.
    #[error("unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// The tokenizer failed or produced no output.
    #[error("tokenizer error for {language}: {message}")]
    Tokenizer { language: String, message: String },

    /// No theme source has a theme with this name.
    #[error("unknown theme: {name}")]
    UnknownTheme { name: String },

    /// The theme was found but could not be built.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// The alternate rendering path was selected without a renderer.
    #[error("no HTML renderer configured; enable fast rendering or call with_renderer")]
    RendererUnavailable,

    /// The renderer could not render the document.
    #[error("HTML renderer produced no output")]
    RenderFailed,

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration or theme file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
