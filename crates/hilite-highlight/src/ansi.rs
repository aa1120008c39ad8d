//! ANSI terminal output for styled runs.

use hilite_theme::{Color, FontFace, Style};

#[cfg(feature = "unicode-width")]
use unicode_width::UnicodeWidthChar;

use crate::run::StyledRun;

const RESET: &str = "\x1b[0m";

/// Narrowest content area when wrapping.
const MIN_CONTENT_WIDTH: usize = 10;

/// Options controlling ANSI rendering behavior.
#[derive(Debug, Clone)]
pub struct AnsiOptions {
    /// Background painted behind all text, usually the theme background.
    /// Translucent foregrounds are blended over it. When `None`, the
    /// terminal's own background shows and alpha is ignored.
    pub background: Option<Color>,
    /// Optional hard wrap width (in columns). When None, no wrapping is
    /// performed and the original line structure is preserved.
    pub width: Option<usize>,
    /// If true and `width` is set, pad each visual line with spaces up
    /// to exactly `width` columns.
    pub pad_to_width: bool,
    /// Tab width (in columns) used when expanding tabs.
    pub tab_width: usize,
    /// Horizontal padding (in columns) on the left of every line.
    pub padding_x: usize,
}

fn detect_terminal_width() -> Option<usize> {
    #[cfg(all(feature = "terminal-size", not(target_arch = "wasm32")))]
    {
        use terminal_size::{Width, terminal_size};
        terminal_size().map(|(Width(w), _)| w as usize)
    }
    #[cfg(any(not(feature = "terminal-size"), target_arch = "wasm32"))]
    {
        None
    }
}

impl Default for AnsiOptions {
    fn default() -> Self {
        let width = detect_terminal_width();
        Self {
            background: None,
            width,
            pad_to_width: width.is_some(),
            tab_width: 4,
            padding_x: 0,
        }
    }
}

impl AnsiOptions {
    /// Options that never wrap or pad, whatever the terminal.
    pub fn plain() -> Self {
        Self {
            background: None,
            width: None,
            pad_to_width: false,
            tab_width: 4,
            padding_x: 0,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }
}

#[cfg(feature = "unicode-width")]
fn char_display_width(c: char, col: usize, tab_width: usize) -> usize {
    if c == '\t' {
        let tab_width = tab_width.max(1);
        let next_tab = ((col / tab_width) + 1) * tab_width;
        next_tab - col
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

#[cfg(not(feature = "unicode-width"))]
fn char_display_width(c: char, col: usize, tab_width: usize) -> usize {
    if c == '\t' {
        let tab_width = tab_width.max(1);
        let next_tab = ((col / tab_width) + 1) * tab_width;
        next_tab - col
    } else {
        1
    }
}

fn push_rgb(codes: &mut Vec<String>, layer: u8, color: Color) {
    let (r, g, b) = color.to_rgb8();
    codes.push(format!("{layer};2;{r};{g};{b}"));
}

fn sgr(codes: &[String]) -> String {
    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

/// Escape sequence selecting `style`, drawn over `base`.
fn style_sgr(style: &Style, base: Option<Color>) -> String {
    let mut codes = Vec::new();
    match style.font.face {
        FontFace::Bold => codes.push("1".to_string()),
        FontFace::UltraLight => codes.push("2".to_string()),
        FontFace::Italic | FontFace::Oblique => codes.push("3".to_string()),
        FontFace::Regular => {}
    }

    let background = match (style.background, base) {
        (Some(bg), Some(base)) => Some(bg.over(base)),
        (Some(bg), None) => Some(bg.with_alpha(1.0)),
        (None, base) => base,
    };
    if let Some(fg) = style.foreground {
        let fg = match background {
            Some(bg) => fg.over(bg),
            None => fg,
        };
        push_rgb(&mut codes, 38, fg);
    }
    if let Some(bg) = background {
        push_rgb(&mut codes, 48, bg);
    }
    sgr(&codes)
}

struct Writer<'o> {
    out: String,
    options: &'o AnsiOptions,
    base: String,
    active: String,
    col: usize,
}

impl Writer<'_> {
    fn content_width(&self) -> Option<usize> {
        self.options.width.map(|w| w.max(MIN_CONTENT_WIDTH))
    }

    fn start_line(&mut self) {
        if self.options.padding_x > 0 {
            self.out.push_str(RESET);
            self.out.push_str(&self.base);
            self.out.extend(std::iter::repeat_n(' ', self.options.padding_x));
            self.out.push_str(&self.active);
            self.col = self.options.padding_x;
        }
    }

    fn end_line(&mut self, newline: bool) {
        if let (true, Some(width)) = (self.options.pad_to_width, self.content_width()) {
            if self.col < width {
                self.out.push_str(RESET);
                self.out.push_str(&self.base);
                self.out.extend(std::iter::repeat_n(' ', width - self.col));
            }
        }
        // Reset before newline so background doesn't extend to terminal edge
        self.out.push_str(RESET);
        if newline {
            self.out.push('\n');
            self.out.push_str(&self.active);
        }
        self.col = 0;
    }

    fn write_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.col == 0 {
                self.start_line();
            }
            if ch == '\n' {
                self.end_line(true);
                continue;
            }
            if ch == '\r' {
                continue;
            }

            let w = char_display_width(ch, self.col, self.options.tab_width);
            if let Some(width) = self.content_width() {
                if w > 0 && self.col + w > width && self.col > self.options.padding_x {
                    self.end_line(true);
                    self.start_line();
                }
            }

            if ch == '\t' {
                let w = char_display_width('\t', self.col, self.options.tab_width);
                self.out.extend(std::iter::repeat_n(' ', w));
                self.col += w;
            } else {
                self.out.push(ch);
                self.col += w;
            }
        }
    }
}

/// Render runs as 24-bit ANSI-colored text.
///
/// Bold faces map to SGR 1, italic and oblique to 3, ultra-light to 2.
/// Every line ends with a reset.
pub fn runs_to_ansi(runs: &[StyledRun], options: &AnsiOptions) -> String {
    let mut base_codes = Vec::new();
    if let Some(bg) = options.background {
        push_rgb(&mut base_codes, 48, bg);
    }

    let mut writer = Writer {
        out: String::new(),
        options,
        base: sgr(&base_codes),
        active: String::new(),
        col: 0,
    };

    for run in runs {
        writer.active = style_sgr(&run.style, options.background);
        writer.out.push_str(&writer.active);
        writer.write_text(&run.text);
        writer.out.push_str(RESET);
    }
    if writer.col > 0 {
        writer.end_line(false);
    }

    writer.out
}
