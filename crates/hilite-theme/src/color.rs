//! Color values and CSS color decoding.
//!
//! Theme stylesheets describe colors as hex strings (`#rgb`, `#rrggbb`,
//! `#rrggbbaa`) or as a handful of CSS color names. Decoding never fails:
//! anything that cannot be understood becomes [`Color::GRAY`].

use tracing::debug;

/// An RGBA color with every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Neutral gray used whenever a color specification cannot be decoded.
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Return the same color with a different alpha channel.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Decode a CSS color value.
    ///
    /// - `#rgb`: each digit is scaled by `/15`
    /// - `#rrggbb`: each pair is scaled by `/255`
    /// - `#rrggbbaa`: as above, with the last pair as alpha
    /// - `white`, `black`, `red`, `green`, `blue`, `navy`
    ///
    /// A hex string of any other length, or an unknown name, yields
    /// [`Color::GRAY`]. Hex digits are scanned per channel, so a channel
    /// that starts with a non-hex character decodes to zero (`#ZZZ` is
    /// black, not gray).
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();

        let Some(hex) = value.strip_prefix('#') else {
            return Self::from_name(value).unwrap_or_else(|| {
                debug!(name = value, "unknown color name, using gray");
                Self::GRAY
            });
        };

        let digits: Vec<char> = hex.chars().collect();
        match digits.len() {
            3 => Self::rgb(
                scan_hex(&digits[0..1]) / 15.0,
                scan_hex(&digits[1..2]) / 15.0,
                scan_hex(&digits[2..3]) / 15.0,
            ),
            len @ (6 | 8) => {
                let alpha = if len == 8 {
                    scan_hex(&digits[6..8]) / 255.0
                } else {
                    1.0
                };
                Self::rgba(
                    scan_hex(&digits[0..2]) / 255.0,
                    scan_hex(&digits[2..4]) / 255.0,
                    scan_hex(&digits[4..6]) / 255.0,
                    alpha,
                )
            }
            len => {
                debug!(value, len, "hex color has unsupported length, using gray");
                Self::GRAY
            }
        }
    }

    /// Look up one of the supported CSS color names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::rgb(1.0, 0.0, 0.0)),
            "green" => Some(Self::rgb(0.0, 0.5, 0.0)),
            "blue" => Some(Self::rgb(0.0, 0.0, 1.0)),
            "navy" => Some(Self::rgb(0.0, 0.0, 0.5)),
            _ => None,
        }
    }

    /// Convert to 8-bit RGB, ignoring alpha.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Composite this color over an opaque background.
    pub fn over(self, background: Color) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        Color::rgb(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
        )
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when the color is translucent.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.a < 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}{:02x}", to_u8(self.a))
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }
}

/// Value of the leading hex digits of a channel slice; zero if there are none.
fn scan_hex(digits: &[char]) -> f32 {
    digits
        .iter()
        .map_while(|c| c.to_digit(16))
        .fold(0u32, |acc, d| acc * 16 + d) as f32
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.002
    }

    fn assert_color(c: Color, r: f32, g: f32, b: f32, a: f32) {
        assert!(
            close(c.r, r) && close(c.g, g) && close(c.b, b) && close(c.a, a),
            "expected ({r}, {g}, {b}, {a}), got {c:?}"
        );
    }

    #[test]
    fn test_six_digit_hex() {
        assert_color(Color::from_css("#808000"), 0.502, 0.502, 0.0, 1.0);
        assert_color(Color::from_css("#ff0000"), 1.0, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_three_digit_hex() {
        assert_color(Color::from_css("#444"), 0.267, 0.267, 0.267, 1.0);
        assert_color(Color::from_css("#fff"), 1.0, 1.0, 1.0, 1.0);
    }

    #[test]
    fn test_eight_digit_hex_alpha() {
        assert_color(Color::from_css("#80800080"), 0.502, 0.502, 0.0, 0.502);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::from_css("red"), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_css("green"), Color::rgb(0.0, 0.5, 0.0));
        assert_eq!(Color::from_css("navy"), Color::rgb(0.0, 0.0, 0.5));
        assert_eq!(Color::from_css(" white\n"), Color::WHITE);
    }

    #[test]
    fn test_unknown_name_is_gray() {
        assert_eq!(Color::from_css("olive"), Color::GRAY);
        assert_eq!(Color::from_css("Red"), Color::GRAY);
    }

    #[test]
    fn test_bad_hex_digits_are_zero() {
        // Distinct from the gray sentinel.
        assert_eq!(Color::from_css("#ZZZ"), Color::BLACK);
        assert_color(Color::from_css("#1Z0000"), 1.0 / 255.0, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_bad_hex_length_is_gray() {
        assert_eq!(Color::from_css("#aaaaa"), Color::GRAY);
        assert_eq!(Color::from_css("#"), Color::GRAY);
        assert_eq!(Color::from_css("#aaaaaaa"), Color::GRAY);
    }

    #[test]
    fn test_over_blends_alpha() {
        let c = Color::WHITE.with_alpha(0.25).over(Color::BLACK);
        assert_color(c, 0.25, 0.25, 0.25, 1.0);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::from_css("#1a2b3c").to_hex(), "#1a2b3c");
        assert_eq!(Color::from_css("#1a2b3c80").to_hex(), "#1a2b3c80");
    }
}
