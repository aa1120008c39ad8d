//! Resolved themes.
//!
//! A [`Theme`] is built once from stylesheet text and is immutable
//! afterwards. Changing the code font produces a new theme via
//! [`Theme::with_font`].

use std::collections::HashMap;

use tracing::debug;

use crate::css::{Declarations, Stylesheet};
use crate::{Color, Font, FontResolver, FontSet, FontSpec, FontVariant, ThemeError};

/// The recognized attributes of one theme class.
///
/// Only `color`, `background-color`, `font-weight` and `font-style` are
/// read; every other property is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub variant: Option<FontVariant>,
}

impl ClassStyle {
    /// Resolve a class's declarations.
    ///
    /// `font-weight` and `font-style` both select the font variant, so when
    /// a class declares both, the one declared last wins.
    pub fn from_declarations(props: &Declarations) -> Self {
        let mut style = Self::default();
        for (name, value) in props {
            match name.as_str() {
                "color" => style.foreground = Some(Color::from_css(value)),
                "background-color" => style.background = Some(Color::from_css(value)),
                "font-weight" | "font-style" => style.variant = Some(FontVariant::from_css(value)),
                _ => {}
            }
        }
        style
    }

    pub fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.variant.is_none()
    }
}

/// The attributes in effect for a piece of text: font, foreground and
/// background color.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font: Font,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Style {
    /// A style that only sets a font.
    pub fn new(font: Font) -> Self {
        Self {
            font,
            foreground: None,
            background: None,
        }
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

/// A fully resolved theme.
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    fonts: FontSet,
    background: Color,
    classes: HashMap<String, ClassStyle>,
    css: String,
}

impl Theme {
    /// Build a theme from stylesheet text.
    ///
    /// Stylesheet text that does not match the dot-class rule shape is
    /// ignored. The only failure is a base font that cannot be resolved.
    pub fn build(
        name: impl Into<String>,
        source: &str,
        font: Option<&FontSpec>,
        resolver: &dyn FontResolver,
    ) -> Result<Self, ThemeError> {
        let fonts = FontSet::resolve(font, resolver)?;
        Ok(Self::from_stylesheet(name, &Stylesheet::parse(source), fonts))
    }

    /// Build a theme from an already scanned stylesheet and resolved fonts.
    pub fn from_stylesheet(name: impl Into<String>, sheet: &Stylesheet, fonts: FontSet) -> Self {
        let name = name.into();
        let background = sheet.base_background().map_or(Color::WHITE, Color::from_css);

        let classes: HashMap<String, ClassStyle> = sheet
            .classes()
            .filter_map(|(class, props)| {
                let style = ClassStyle::from_declarations(props);
                (!style.is_empty()).then(|| (class.to_string(), style))
            })
            .collect();

        debug!(
            theme = %name,
            rules = sheet.len(),
            styled = classes.len(),
            font = %fonts.base.family,
            "built theme"
        );

        Self {
            name,
            fonts,
            background,
            classes,
            css: sheet.to_css(),
        }
    }

    /// The same theme with a different code font. Bold and italic variants
    /// are derived again from the new base font.
    pub fn with_font(&self, font: Option<&FontSpec>, resolver: &dyn FontResolver) -> Result<Self, ThemeError> {
        Ok(Self {
            fonts: FontSet::resolve(font, resolver)?,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Background of the code block (white when the theme sets none).
    pub fn background(&self) -> Color {
        self.background
    }

    /// The stylesheet as compact CSS without the code block background.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Resolved attributes of a class, if the theme styles it.
    pub fn class_style(&self, class: &str) -> Option<&ClassStyle> {
        self.classes.get(class)
    }

    /// Number of classes the theme styles.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// The style of unscoped text: the base font and nothing else.
    pub fn base_style(&self) -> Style {
        Style::new(self.fonts.base.clone())
    }

    /// Overlay a class's attributes onto `style`, each attribute replacing
    /// the previous value only if the class sets it. Returns `false` when
    /// the theme does not know the class.
    pub fn apply_class(&self, style: &mut Style, class: &str) -> bool {
        let Some(class_style) = self.classes.get(class) else {
            return false;
        };
        if let Some(color) = class_style.foreground {
            style.foreground = Some(color);
        }
        if let Some(color) = class_style.background {
            style.background = Some(color);
        }
        if let Some(variant) = class_style.variant {
            style.font = self.fonts.get(variant).clone();
        }
        true
    }

    /// Compose the style for a list of classes, outermost first.
    pub fn style_for<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> Style {
        let mut style = self.base_style();
        for class in classes {
            self.apply_class(&mut style, class);
        }
        style
    }
}
