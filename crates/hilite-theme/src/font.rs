//! Fonts, font variants and the font lookup capability.
//!
//! Looking a family name up in the platform's font system is the host's
//! job; this crate only asks for it through [`FontResolver`].

use tracing::debug;

use crate::ThemeError;

/// Family used when the caller does not ask for a font.
pub const DEFAULT_FAMILY: &str = "courier";

/// Size used when the caller does not ask for a font.
pub const DEFAULT_SIZE: f32 = 14.0;

/// Generic monospaced family name.
pub const MONOSPACE_FAMILY: &str = "monospace";

/// A face within a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    Oblique,
    UltraLight,
}

/// A resolved, renderable font.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub face: FontFace,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, face: FontFace, size: f32) -> Self {
        Self {
            family: family.into(),
            face,
            size,
        }
    }

    /// Whether this face renders heavier than regular.
    pub fn is_bold(&self) -> bool {
        self.face == FontFace::Bold
    }

    /// Whether this face is slanted.
    pub fn is_slanted(&self) -> bool {
        matches!(self.face, FontFace::Italic | FontFace::Oblique)
    }
}

/// The code font a caller asks for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_SIZE)
    }
}

/// Turns a family name and face into a renderable font.
///
/// Implemented by the host toolkit. Returning `None` means the face is not
/// installed.
pub trait FontResolver {
    /// Look up `face` within `family` at `size`.
    fn resolve(&self, family: &str, face: FontFace, size: f32) -> Option<Font>;

    /// The platform's fallback font, if it has one.
    fn system_default(&self, size: f32) -> Option<Font>;
}

/// A resolver that accepts every request as-is.
///
/// Suitable for hosts that render faces themselves, such as terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFonts;

impl FontResolver for GenericFonts {
    fn resolve(&self, family: &str, face: FontFace, size: f32) -> Option<Font> {
        Some(Font::new(family, face, size))
    }

    fn system_default(&self, size: f32) -> Option<Font> {
        Some(Font::new(MONOSPACE_FAMILY, FontFace::Regular, size))
    }
}

/// Which of the theme's three code fonts a class selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    Base,
    Bold,
    Italic,
}

impl FontVariant {
    /// Map a `font-weight` or `font-style` value to a variant.
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "bold" | "bolder" | "600" | "700" | "800" | "900" => Self::Bold,
            "italic" | "oblique" => Self::Italic,
            _ => Self::Base,
        }
    }
}

/// The base code font and its bold and italic variants.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSet {
    pub base: Font,
    pub bold: Font,
    pub italic: Font,
}

impl FontSet {
    /// Resolve the requested base font and derive its variants.
    ///
    /// Falls back to [`DEFAULT_FAMILY`], then to the resolver's system
    /// default. Fails only when none of those resolve.
    pub fn resolve(spec: Option<&FontSpec>, resolver: &dyn FontResolver) -> Result<Self, ThemeError> {
        let size = spec.map_or(DEFAULT_SIZE, |s| s.size);
        let base = spec
            .and_then(|s| resolver.resolve(&s.family, FontFace::Regular, s.size))
            .or_else(|| resolver.resolve(DEFAULT_FAMILY, FontFace::Regular, size))
            .or_else(|| resolver.system_default(size))
            .ok_or_else(|| ThemeError::FontUnavailable {
                family: spec.map_or(DEFAULT_FAMILY, |s| s.family.as_str()).to_string(),
            })?;

        Ok(Self::from_base(base, resolver))
    }

    /// Derive bold and italic variants from an already resolved base font.
    ///
    /// Italic falls back to the family's oblique face, then to the base
    /// font; an italic face from another family does not count. Bold falls
    /// back to the base font.
    pub fn from_base(base: Font, resolver: &dyn FontResolver) -> Self {
        let bold = resolver
            .resolve(&base.family, FontFace::Bold, base.size)
            .unwrap_or_else(|| {
                debug!(family = %base.family, "no bold face, using base font");
                base.clone()
            });

        let italic = resolver
            .resolve(&base.family, FontFace::Italic, base.size)
            .filter(|font| font.family == base.family)
            .or_else(|| resolver.resolve(&base.family, FontFace::Oblique, base.size))
            .unwrap_or_else(|| {
                debug!(family = %base.family, "no italic or oblique face, using base font");
                base.clone()
            });

        Self { base, bold, italic }
    }

    /// The font for a variant.
    pub fn get(&self, variant: FontVariant) -> &Font {
        match variant {
            FontVariant::Base => &self.base,
            FontVariant::Bold => &self.bold,
            FontVariant::Italic => &self.italic,
        }
    }
}
