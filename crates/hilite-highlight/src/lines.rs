//! Line numbering for finished runs.

use hilite_theme::{Color, Font, FontFace, MONOSPACE_FAMILY, Style};

use crate::run::{StyledRun, plain_text};

/// How to number lines. All setters clamp to valid values.
#[derive(Debug, Clone, PartialEq)]
pub struct LineNumberConfig {
    start: usize,
    min_width: usize,
    separator: String,
    line_break: String,
    dark: bool,
    font_size: f32,
}

impl Default for LineNumberConfig {
    fn default() -> Self {
        Self {
            start: 1,
            min_width: 2,
            separator: DEFAULT_SEPARATOR.to_string(),
            line_break: "\n".to_string(),
            dark: false,
            font_size: 16.0,
        }
    }
}

const DEFAULT_SEPARATOR: &str = "  ";

impl LineNumberConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the first line (at least 1).
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn set_start(&mut self, start: i64) {
        self.start = usize::try_from(start).unwrap_or(1).max(1);
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.set_start(start);
        self
    }

    /// Minimum number of digits (at least 2).
    pub fn min_width(&self) -> usize {
        self.min_width
    }

    pub fn set_min_width(&mut self, width: usize) {
        self.min_width = width.max(2);
    }

    pub fn with_min_width(mut self, width: usize) -> Self {
        self.set_min_width(width);
        self
    }

    /// Text between the number and the line (two spaces when set empty).
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        let separator = separator.into();
        self.separator = if separator.is_empty() {
            DEFAULT_SEPARATOR.to_string()
        } else {
            separator
        };
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.set_separator(separator);
        self
    }

    /// The line break the runs were rendered with (`"\n"` when set empty).
    pub fn line_break(&self) -> &str {
        &self.line_break
    }

    pub fn set_line_break(&mut self, line_break: impl Into<String>) {
        let line_break = line_break.into();
        self.line_break = if line_break.is_empty() {
            "\n".to_string()
        } else {
            line_break
        };
    }

    pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
        self.set_line_break(line_break);
        self
    }

    /// Whether the code is shown on a dark background.
    pub fn dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    pub fn with_dark(mut self, dark: bool) -> Self {
        self.set_dark(dark);
        self
    }

    /// Size of the numbers' font.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.set_font_size(font_size);
        self
    }

    /// Digits needed for `lines` lines. Grows by one digit per factor of
    /// 100, starting above 99.
    pub fn digit_width(&self, lines: usize) -> usize {
        let mut total = lines + self.start.saturating_sub(1);
        let mut width = self.min_width;
        while total > 99 {
            width += 1;
            total /= 100;
        }
        width
    }

    /// Style of numbers, separators and inserted line breaks.
    pub fn number_style(&self) -> Style {
        let gray = if self.dark {
            Color::rgb(0.667, 0.667, 0.667)
        } else {
            Color::rgb(0.333, 0.333, 0.333)
        };
        Style::new(Font::new(MONOSPACE_FAMILY, FontFace::UltraLight, self.font_size))
            .with_foreground(gray.with_alpha(0.2))
    }
}

/// Prefix every line of `runs` with its number.
///
/// Each line becomes: number, separator, the line's own runs, line break.
/// The runs are split at every occurrence of the line break, so text ending
/// in a line break gets a final, empty numbered line.
pub fn add_line_numbers(runs: &[StyledRun], config: &LineNumberConfig) -> Vec<StyledRun> {
    let lines = split_lines(runs, config.line_break());
    let width = config.digit_width(lines.len());
    let style = config.number_style();

    let mut out = Vec::with_capacity(runs.len() + lines.len() * 3);
    for (number, line) in (config.start()..).zip(lines) {
        out.push(StyledRun::new(format!("{number:0width$}"), style.clone()));
        out.push(StyledRun::new(config.separator(), style.clone()));
        out.extend(line);
        out.push(StyledRun::new(config.line_break(), style.clone()));
    }
    out
}

/// Split runs into lines, keeping each fragment's style.
///
/// Breaks are found in the joined text, so a multi-character line break
/// whose characters sit in neighbouring runs still ends the line.
fn split_lines(runs: &[StyledRun], line_break: &str) -> Vec<Vec<StyledRun>> {
    let text = plain_text(runs);
    let mut breaks = text.match_indices(line_break).map(|(at, _)| at).peekable();

    let mut lines = vec![Vec::new()];
    // Text before this offset belongs to a break already taken.
    let mut consumed = 0;
    let mut start = 0;
    for run in runs {
        let end = start + run.text.len();
        let mut pos = consumed.max(start);
        while pos < end {
            let cut = match breaks.peek() {
                Some(&at) if at < end => at,
                _ => end,
            };
            if cut > pos {
                if let Some(line) = lines.last_mut() {
                    line.push(StyledRun::new(&run.text[pos - start..cut - start], run.style.clone()));
                }
            }
            if cut == end {
                break;
            }
            breaks.next();
            lines.push(Vec::new());
            consumed = cut + line_break.len();
            pos = consumed;
        }
        start = end;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(face: FontFace) -> Style {
        Style::new(Font::new("courier", face, 14.0))
    }

    fn code(text: &str) -> Vec<StyledRun> {
        vec![StyledRun::new(text, style(FontFace::Regular))]
    }

    #[test]
    fn test_config_clamps() {
        let config = LineNumberConfig::new()
            .with_start(-4)
            .with_min_width(0)
            .with_separator("")
            .with_line_break("");
        assert_eq!(config.start(), 1);
        assert_eq!(config.min_width(), 2);
        assert_eq!(config.separator(), "  ");
        assert_eq!(config.line_break(), "\n");
        assert_eq!(LineNumberConfig::new().with_start(0).start(), 1);
        assert_eq!(LineNumberConfig::new().with_start(7).start(), 7);
    }

    #[test]
    fn test_simple_numbering() {
        let out = add_line_numbers(&code("a\nb"), &LineNumberConfig::new());
        assert_eq!(plain_text(&out), "01  a\n02  b\n");
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_width_grows_at_hundred() {
        let config = LineNumberConfig::new();
        assert_eq!(config.digit_width(99), 2);
        assert_eq!(config.digit_width(100), 3);
        assert_eq!(config.digit_width(9_999), 3);
        assert_eq!(config.digit_width(10_000), 4);
        // Not at 10.
        assert_eq!(config.digit_width(10), 2);
    }

    #[test]
    fn test_start_offset_counts_toward_width() {
        let config = LineNumberConfig::new().with_start(95);
        assert_eq!(config.digit_width(5), 2);
        assert_eq!(config.digit_width(6), 3);

        let out = add_line_numbers(&code("x\ny"), &LineNumberConfig::new().with_start(9));
        assert_eq!(plain_text(&out), "09  x\n10  y\n");
    }

    #[test]
    fn test_min_width_and_separator() {
        let config = LineNumberConfig::new().with_min_width(4).with_separator(" | ");
        let out = add_line_numbers(&code("x"), &config);
        assert_eq!(plain_text(&out), "0001 | x\n");
    }

    #[test]
    fn test_trailing_break_adds_empty_line() {
        let out = add_line_numbers(&code("x\n"), &LineNumberConfig::new());
        assert_eq!(plain_text(&out), "01  x\n02  \n");
    }

    #[test]
    fn test_styles_survive_splitting() {
        let runs = vec![
            StyledRun::new("a\nb", style(FontFace::Bold)),
            StyledRun::new("c", style(FontFace::Italic)),
        ];
        let out = add_line_numbers(&runs, &LineNumberConfig::new());
        let texts: Vec<_> = out.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["01", "  ", "a", "\n", "02", "  ", "b", "c", "\n"]);
        assert_eq!(out[2].style.font.face, FontFace::Bold);
        assert_eq!(out[6].style.font.face, FontFace::Bold);
        assert_eq!(out[7].style.font.face, FontFace::Italic);
    }

    #[test]
    fn test_number_style() {
        let light = LineNumberConfig::new().number_style();
        assert_eq!(light.font.face, FontFace::UltraLight);
        assert_eq!(light.font.size, 16.0);
        let fg = light.foreground.unwrap();
        assert_eq!(fg.a, 0.2);

        let dark = LineNumberConfig::new().with_dark(true).with_font_size(10.0).number_style();
        assert!(dark.foreground.unwrap().r > fg.r);
        assert_eq!(dark.font.size, 10.0);
    }

    #[test]
    fn test_custom_line_break() {
        let config = LineNumberConfig::new().with_line_break("\r\n");
        let out = add_line_numbers(&code("a\r\nb"), &config);
        assert_eq!(plain_text(&out), "01  a\r\n02  b\r\n");
    }

    #[test]
    fn test_line_break_across_runs() {
        let runs = vec![
            StyledRun::new("a\r", style(FontFace::Bold)),
            StyledRun::new("\nb", style(FontFace::Italic)),
        ];
        let config = LineNumberConfig::new().with_line_break("\r\n");
        let out = add_line_numbers(&runs, &config);
        assert_eq!(plain_text(&out), "01  a\r\n02  b\r\n");

        let texts: Vec<_> = out.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["01", "  ", "a", "\r\n", "02", "  ", "b", "\r\n"]);
        assert_eq!(out[2].style.font.face, FontFace::Bold);
        assert_eq!(out[6].style.font.face, FontFace::Italic);
    }

    #[test]
    fn test_break_spanning_three_runs() {
        let runs = vec![
            StyledRun::new("x<", style(FontFace::Regular)),
            StyledRun::new("-", style(FontFace::Bold)),
            StyledRun::new(">y<-", style(FontFace::Italic)),
        ];
        let out = add_line_numbers(&runs, &LineNumberConfig::new().with_line_break("<->"));
        assert_eq!(plain_text(&out), "01  x<->02  y<-<->");
    }

    #[test]
    fn test_dark_and_font_size_accessors() {
        let mut config = LineNumberConfig::new();
        assert!(!config.dark());
        assert_eq!(config.font_size(), 16.0);
        config.set_dark(true);
        config.set_font_size(12.0);
        assert!(config.dark());
        assert_eq!(config.number_style().font.size, 12.0);
    }
}
