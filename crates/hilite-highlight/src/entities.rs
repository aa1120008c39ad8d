//! Character reference decoding over finished runs.
//!
//! References are matched on the concatenated text of all runs, so one
//! split across a run boundary is still found. The decoded character takes
//! the style of the run the reference starts in.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use tracing::trace;

use crate::run::StyledRun;

/// A reference found in the concatenated text, with its replacement.
#[derive(Debug)]
struct Replacement {
    start: usize,
    end: usize,
    text: String,
}

/// Replace `&name;`, `&#123;` and `&#x7b;` references with the characters
/// they stand for. Unknown references are left as they are. Runs that end
/// up empty are dropped.
pub fn decode_entities(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    if !runs.iter().any(|run| run.text.contains('&')) {
        return runs;
    }

    let text: String = runs.iter().map(|run| run.text.as_str()).collect();
    let replacements = find_replacements(&text);
    if replacements.is_empty() {
        return runs;
    }

    let mut out = Vec::with_capacity(runs.len());
    let mut pending = replacements.iter().peekable();
    let mut run_start = 0;
    // Text before this offset was already written by an earlier run.
    let mut consumed = 0;

    for run in runs {
        let run_end = run_start + run.text.len();
        let mut pos = consumed.max(run_start);
        let mut decoded = String::with_capacity(run.text.len());

        while pos < run_end {
            match pending.peek() {
                Some(rep) if rep.start < run_end => {
                    decoded.push_str(&text[pos..rep.start]);
                    decoded.push_str(&rep.text);
                    pos = rep.end;
                    pending.next();
                }
                _ => {
                    decoded.push_str(&text[pos..run_end]);
                    pos = run_end;
                }
            }
        }

        consumed = pos;
        run_start = run_end;
        if !decoded.is_empty() {
            out.push(StyledRun::new(decoded, run.style));
        }
    }

    out
}

fn find_replacements(text: &str) -> Vec<Replacement> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('&') {
        let start = pos + offset;
        let Some(end) = reference_end(bytes, start) else {
            pos = start + 1;
            continue;
        };

        let raw = &text[start..end];
        match unescape_with(raw, resolve_html5_entity) {
            Ok(Cow::Owned(decoded)) if decoded != raw => found.push(Replacement {
                start,
                end,
                text: decoded,
            }),
            Ok(_) => {}
            Err(err) => trace!(reference = raw, %err, "leaving unknown reference as is"),
        }
        pos = end;
    }

    found
}

/// End (exclusive) of a `&#?[A-Za-z0-9]+;` reference starting at `start`.
fn reference_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    if bytes.get(pos) == Some(&b'#') {
        pos += 1;
    }
    let name_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_alphanumeric) {
        pos += 1;
    }
    (pos > name_start && bytes.get(pos) == Some(&b';')).then_some(pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plain_text;
    use hilite_theme::{Color, Font, FontFace, Style};

    fn style(n: f32) -> Style {
        Style::new(Font::new("mono", FontFace::Regular, 12.0)).with_foreground(Color::rgb(n, n, n))
    }

    fn runs(parts: &[(&str, f32)]) -> Vec<StyledRun> {
        parts.iter().map(|(t, n)| StyledRun::new(*t, style(*n))).collect()
    }

    #[test]
    fn test_named_and_numeric() {
        let out = decode_entities(runs(&[("&lt;a&gt; &amp; &quot;&#39;&#x41;&nbsp;", 0.0)]));
        assert_eq!(plain_text(&out), "<a> & \"'A\u{a0}");
    }

    #[test]
    fn test_unknown_and_malformed_pass_through() {
        let input = "&bogus; & &; &#; a&b c&lt d;";
        let out = decode_entities(runs(&[(input, 0.0)]));
        assert_eq!(plain_text(&out), input);
    }

    #[test]
    fn test_no_entities_returns_runs_unchanged() {
        let input = runs(&[("a", 0.0), ("b", 1.0)]);
        assert_eq!(decode_entities(input.clone()), input);
    }

    #[test]
    fn test_styles_and_boundaries_kept() {
        let out = decode_entities(runs(&[("a &lt; b", 0.0), ("&gt;", 1.0), ("c", 0.5)]));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].text, "a < b");
        assert_eq!(out[1].text, ">");
        assert_eq!(out[1].style, style(1.0));
        assert_eq!(out[2].text, "c");
    }

    #[test]
    fn test_straddling_reference_takes_first_style() {
        let out = decode_entities(runs(&[("x&a", 0.0), ("mp;", 1.0), ("y&l", 0.5), ("t;z", 0.2)]));
        assert_eq!(plain_text(&out), "x&y<z");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].text, "x&");
        assert_eq!(out[0].style, style(0.0));
        assert_eq!(out[1].text, "y<");
        assert_eq!(out[2].text, "z");
        assert_eq!(out[2].style, style(0.2));
    }

    #[test]
    fn test_multibyte_text_around_references() {
        let out = decode_entities(runs(&[("é&amp;ü", 0.0)]));
        assert_eq!(out[0].text, "é&ü");
    }
}
