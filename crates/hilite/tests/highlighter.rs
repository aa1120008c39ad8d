use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hilite::{
    Color, Config, Error, Font, FontFace, FontResolver, FontSpec, GenericFonts, Highlighter, LineNumberConfig,
    MemoryThemes, StyledRun, ThemeError,
};
use hilite_test_harness::{
    FIXTURE_THEMES, MockTokenizer, RecordingRenderer, approx_eq, find_run, plain_text, texts,
};

const KEYWORD_HTML: &str = r#"<span class="hljs-keyword">let</span> s = <span class="hljs-string">&quot;hi&quot;</span>;"#;

fn tokenizer() -> MockTokenizer {
    MockTokenizer::new(["rust", "python"])
        .with_output("let s = \"hi\";", KEYWORD_HTML)
        .with_undefined("broken")
}

fn fixtures() -> MemoryThemes {
    FIXTURE_THEMES.iter().copied().collect()
}

fn highlighter() -> Highlighter {
    Highlighter::new(tokenizer(), fixtures(), GenericFonts).unwrap()
}

/// Resolves every font until switched off, then none at all.
#[derive(Clone, Default)]
struct SwitchableFonts(Rc<Cell<bool>>);

impl SwitchableFonts {
    fn uninstall_all(&self) {
        self.0.set(true);
    }
}

impl FontResolver for SwitchableFonts {
    fn resolve(&self, family: &str, face: FontFace, size: f32) -> Option<Font> {
        (!self.0.get()).then(|| Font::new(family, face, size))
    }

    fn system_default(&self, size: f32) -> Option<Font> {
        (!self.0.get()).then(|| Font::new("monospace", FontFace::Regular, size))
    }
}

#[test]
fn test_highlight_decodes_tokenizer_output() {
    let runs = highlighter().highlight("let s = \"hi\";", Some("rust")).unwrap();
    assert_eq!(plain_text(&runs), "let s = \"hi\";");
    assert_eq!(texts(&runs), ["let", " s = ", "\"hi\"", ";"]);

    let keyword = find_run(&runs, "let").unwrap();
    assert!(keyword.style.font.is_bold());
    assert!(approx_eq(keyword.style.foreground.unwrap(), Color::rgb(0.0, 0.0, 1.0)));
    let string = find_run(&runs, "\"hi\"").unwrap();
    assert!(approx_eq(string.style.foreground.unwrap(), Color::rgb(1.0, 0.0, 0.0)));
}

#[test]
fn test_unknown_language_is_no_result() {
    let err = highlighter().highlight("x", Some("cobol")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedLanguage { ref language } if language == "cobol"));
}

#[test]
fn test_undefined_output_is_no_result() {
    let err = highlighter().highlight("broken", Some("rust")).unwrap_err();
    assert!(matches!(err, Error::Tokenizer { ref language, .. } if language == "rust"));
}

#[test]
fn test_autodetect_passes_no_language() {
    let tokenizer = tokenizer();
    let hl = Highlighter::new(tokenizer.clone(), fixtures(), GenericFonts).unwrap();
    hl.highlight("x", None).unwrap();
    let calls = tokenizer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].language, None);
    assert!(!calls[0].ignore_illegals);
}

#[test]
fn test_ignore_illegals_is_forwarded() {
    let tokenizer = tokenizer();
    let mut hl = Highlighter::new(tokenizer.clone(), fixtures(), GenericFonts).unwrap();
    hl.set_ignore_illegals(true);
    hl.highlight("x", Some("python")).unwrap();
    assert!(tokenizer.calls()[0].ignore_illegals);
}

#[test]
fn test_unknown_theme_keeps_previous() {
    let mut hl = highlighter();
    let before = hl.theme().clone();
    let err = hl.set_theme("solarized").unwrap_err();
    assert!(matches!(err, Error::UnknownTheme { ref name } if name == "solarized"));
    assert_eq!(hl.theme().name(), before.name());
    assert_eq!(hl.config().theme, "default");
}

#[test]
fn test_missing_default_theme_fails_construction() {
    let themes = MemoryThemes::new().with("dark", ".hljs{color:#fff}");
    let err = Highlighter::new(tokenizer(), themes, GenericFonts).err().unwrap();
    assert!(matches!(err, Error::UnknownTheme { .. }));
}

#[test]
fn test_set_theme_notifies_observers() {
    let mut hl = highlighter();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    hl.on_theme_change(move |theme| log.borrow_mut().push(theme.name().to_string()));

    let dark = hl.set_theme("dark").unwrap();
    assert_eq!(dark.name(), "dark");
    assert_eq!(dark.background(), Color::BLACK);
    assert!(hl.set_theme("missing").is_err());
    hl.set_font(FontSpec::new("Menlo", 20.0)).unwrap();

    assert_eq!(*seen.borrow(), ["dark", "dark"]);
    assert_eq!(hl.theme().fonts().base.family, "Menlo");
}

#[test]
fn test_set_theme_keeps_font() {
    let mut hl = highlighter();
    hl.set_theme_with_font("light", FontSpec::new("Iosevka", 12.0)).unwrap();
    let theme = hl.set_theme("dark").unwrap();
    assert_eq!(theme.fonts().base.family, "Iosevka");
    assert_eq!(theme.fonts().base.size, 12.0);
}

#[test]
fn test_no_line_numbers_is_identical() {
    let hl = highlighter();
    let code = "let s = \"hi\";";
    let plain = hl.highlight(code, Some("rust")).unwrap();
    let explicit = hl.highlight_with_line_numbers(code, Some("rust"), None).unwrap();
    assert_eq!(plain, explicit);
}

#[test]
fn test_configured_line_numbers() {
    let mut hl = highlighter();
    hl.set_line_numbers(Some(LineNumberConfig::new().with_start(9)));
    let runs = hl.highlight("a\nb", Some("python")).unwrap();
    assert_eq!(plain_text(&runs), "09  a\n10  b\n");
}

#[test]
fn test_alternate_path_needs_renderer() {
    let mut hl = highlighter();
    hl.set_fast_render(false);
    let err = hl.highlight("x", Some("rust")).unwrap_err();
    assert!(matches!(err, Error::RendererUnavailable));
}

#[test]
fn test_alternate_path_uses_renderer() {
    let base = hilite::Style::new(hilite::Font::new("x", hilite::FontFace::Regular, 1.0));
    let renderer = RecordingRenderer::returning(vec![StyledRun::new("rendered", base)]);
    let config = Config {
        fast_render: false,
        ..Config::default()
    };
    let hl = Highlighter::with_config(tokenizer(), fixtures(), GenericFonts, config)
        .unwrap()
        .with_renderer(renderer.clone());

    let runs = hl.highlight("a < b", Some("rust")).unwrap();
    assert_eq!(texts(&runs), ["rendered"]);

    let documents = renderer.documents();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].starts_with("<style>.hljs{color:#000000;}"));
    assert!(documents[0].ends_with(r#"<pre><code class="hljs">a &lt; b</code></pre>"#));
}

#[test]
fn test_failing_renderer() {
    let mut hl = highlighter().with_renderer(RecordingRenderer::failing());
    hl.set_fast_render(false);
    assert!(matches!(hl.highlight("x", None), Err(Error::RenderFailed)));
}

#[test]
fn test_listings_delegate() {
    let hl = highlighter();
    assert_eq!(hl.available_themes(), ["dark", "default", "light"]);
    assert_eq!(hl.supported_languages(), ["rust", "python"]);
}

#[test]
fn test_config_theme_and_font_applied() {
    let config = Config::from_toml_str("theme = \"dark\"\n[font]\nfamily = \"Menlo\"\nsize = 11.0\n").unwrap();
    let hl = Highlighter::with_config(tokenizer(), fixtures(), GenericFonts, config).unwrap();
    assert_eq!(hl.theme().name(), "dark");
    assert_eq!(hl.theme().fonts().italic.family, "Menlo");
}

#[test]
fn test_decoder_samples() {
    let hl = highlighter();
    hilite_test_harness::test_samples(hl.theme(), env!("CARGO_MANIFEST_DIR"));
}

#[test]
fn test_font_failure_keeps_previous_theme() {
    let fonts = SwitchableFonts::default();
    let mut hl = Highlighter::new(tokenizer(), fixtures(), fonts.clone()).unwrap();
    hl.set_font(FontSpec::new("Menlo", 13.0)).unwrap();

    let changes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&changes);
    hl.on_theme_change(move |_| counter.set(counter.get() + 1));
    fonts.uninstall_all();

    let err = hl.set_font(FontSpec::new("Iosevka", 12.0)).unwrap_err();
    assert!(matches!(err, Error::Theme(ThemeError::FontUnavailable { ref family }) if family == "Iosevka"));
    let err = hl.set_theme_with_font("dark", FontSpec::new("Iosevka", 12.0)).unwrap_err();
    assert!(matches!(err, Error::Theme(ThemeError::FontUnavailable { .. })));
    assert!(hl.set_theme("dark").is_err());

    assert_eq!(hl.theme().name(), "default");
    assert_eq!(hl.theme().fonts().base.family, "Menlo");
    assert_eq!(hl.theme().fonts().base.size, 13.0);
    assert_eq!(hl.config().theme, "default");
    assert_eq!(hl.config().font, Some(FontSpec::new("Menlo", 13.0)));
    assert_eq!(changes.get(), 0);
}
