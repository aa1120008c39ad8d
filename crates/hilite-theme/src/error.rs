/// Errors that can occur while building a [`Theme`](crate::Theme).
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// Neither the requested family, the default family, nor the
    /// platform's system font could be resolved.
    #[error("no usable code font: `{family}` could not be resolved and there is no system default")]
    FontUnavailable { family: String },
}
