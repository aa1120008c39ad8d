//! Dot-class stylesheet scanning.
//!
//! Theme stylesheets are only read for rules of the shape
//! `.a, .b .c { name: value; ... }`. Everything else (element selectors,
//! pseudo-classes, at-rules, comments) is skipped without error. Rules
//! nested inside an at-rule block are still picked up, because a brace
//! that is not preceded by a dot-class list does not consume its body.

use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::trace;

/// Class name of the code block itself. It sits at the bottom of every
/// scope stack and carries the theme background.
pub const BASE_SCOPE: &str = "hljs";

/// Properties declared for one class, in declaration order.
pub type Declarations = IndexMap<String, String>;

/// The dot-class rules of a theme stylesheet, keyed by bare class name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    classes: IndexMap<String, Declarations>,
}

impl Stylesheet {
    /// Scan a stylesheet.
    ///
    /// Every class named in a selector list receives its own copy of the
    /// rule's declarations. When several rules name the same class, later
    /// declarations overwrite earlier ones of the same property and move
    /// it to the end of the declaration order.
    pub fn parse(source: &str) -> Self {
        let source = strip_comments(source);
        let source = source.as_ref();
        let mut sheet = Stylesheet::default();
        let mut pos = 0;

        while let Some(offset) = source[pos..].find('{') {
            let open = pos + offset;
            let Some(selectors) = trailing_selectors(&source[..open]) else {
                pos = open + 1;
                continue;
            };
            let Some(close_offset) = source[open + 1..].find('}') else {
                break;
            };
            let close = open + 1 + close_offset;
            let declarations = parse_declarations(&source[open + 1..close]);

            if declarations.is_empty() {
                trace!(selectors, "rule has no usable declarations");
            } else {
                for class in selectors
                    .split(is_separator)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.trim_start_matches('.'))
                {
                    sheet.merge(class, &declarations);
                }
            }

            pos = close + 1;
        }

        sheet
    }

    fn merge(&mut self, class: &str, declarations: &[(String, String)]) {
        let props = self.classes.entry(class.to_string()).or_default();
        for (name, value) in declarations {
            props.shift_remove(name);
            props.insert(name.clone(), value.clone());
        }
    }

    /// Declarations for a bare class name (no leading dot).
    pub fn get(&self, class: &str) -> Option<&Declarations> {
        self.classes.get(class)
    }

    /// Iterate classes in first-seen order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &Declarations)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The code block background: `background` on the base scope, falling
    /// back to `background-color`.
    pub fn base_background(&self) -> Option<&str> {
        let base = self.get(BASE_SCOPE)?;
        base.get("background")
            .or_else(|| base.get("background-color"))
            .map(String::as_str)
    }

    /// Serialize back to compact CSS, leaving out the base scope's
    /// background declarations so that a consumer embedding this text
    /// does not paint the background twice.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (class, props) in &self.classes {
            css.push('.');
            css.push_str(class);
            css.push('{');
            for (name, value) in props {
                if class == BASE_SCOPE && is_background_property(name) {
                    continue;
                }
                css.push_str(name);
                css.push(':');
                css.push_str(value);
                css.push(';');
            }
            css.push('}');
        }
        css
    }
}

fn is_background_property(name: &str) -> bool {
    name.eq_ignore_ascii_case("background") || name.eq_ignore_ascii_case("background-color")
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_ascii_whitespace()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Find the run of `.ident` selectors that ends right before a `{`.
///
/// `prefix` is the stylesheet text up to (not including) the brace.
fn trailing_selectors(prefix: &str) -> Option<&str> {
    let bytes = prefix.as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }

    let mut start = None;
    let mut cursor = end;
    loop {
        let ident_end = cursor;
        while cursor > 0 && is_ident_byte(bytes[cursor - 1]) {
            cursor -= 1;
        }
        if cursor == ident_end || cursor == 0 || bytes[cursor - 1] != b'.' {
            break;
        }
        cursor -= 1;
        start = Some(cursor);

        let separators_end = cursor;
        while cursor > 0 && is_separator(bytes[cursor - 1] as char) {
            cursor -= 1;
        }
        if cursor == separators_end {
            break;
        }
    }

    start.map(|s| &prefix[s..end])
}

/// Split a rule body into `name:value` pairs. Pairs that do not split into
/// exactly two parts are dropped.
fn parse_declarations(body: &str) -> Vec<(String, String)> {
    body.split(';')
        .filter_map(|pair| {
            let mut parts = pair.split(':');
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return None;
            };
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn strip_comments(source: &str) -> Cow<'_, str> {
    if !source.contains("/*") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
