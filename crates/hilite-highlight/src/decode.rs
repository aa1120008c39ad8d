//! Tokenizer HTML to styled runs.
//!
//! This is not an HTML parser. It recognizes exactly the two tags a
//! highlight.js-style tokenizer emits, `<span class="...">` and `</span>`,
//! and treats any other `<` as literal text.

use hilite_theme::Theme;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::entities::decode_entities;
use crate::run::StyledRun;
use crate::scope::ScopeStack;

/// What follows `<` in an opening tag, up to the class value.
const SPAN_OPEN: &str = "span class=\"";
/// End of the class value and the opening tag.
const SPAN_OPEN_END: &str = "\">";
/// What follows `<` in a closing tag.
const SPAN_CLOSE: &str = "/span>";

/// Decode tokenizer HTML into styled runs.
///
/// Never fails: unknown classes contribute nothing, an unbalanced
/// `</span>` is ignored and unrecognized markup is kept as text. Entity
/// references are decoded once, after all runs are built.
pub fn decode(html: &str, theme: &Theme) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut scopes = ScopeStack::new(theme);
    let mut cursor = Cursor::new(html);

    loop {
        let text = cursor.take_until("<");
        if !text.is_empty() {
            runs.push(StyledRun::new(text, scopes.style().clone()));
        }
        if !cursor.eat("<") {
            break;
        }

        match cursor.peek() {
            Some('s') if cursor.eat(SPAN_OPEN) => {
                let classes = cursor.take_until(SPAN_OPEN_END);
                if !cursor.eat(SPAN_OPEN_END) {
                    debug!(classes, "unterminated span tag at end of input");
                }
                trace!(classes, depth = scopes.depth(), "open scope");
                scopes.push(classes);
            }
            Some('/') if cursor.eat(SPAN_CLOSE) => {
                scopes.pop();
            }
            _ => {
                trace!(pos = cursor.pos(), "literal '<'");
                runs.push(StyledRun::new("<", scopes.style().clone()));
            }
        }
    }

    if scopes.depth() > 1 {
        debug!(open = scopes.depth() - 1, "input ended with open spans");
    }

    decode_entities(runs)
}

/// Wrap tokenizer HTML in a standalone document carrying the theme's CSS,
/// for hosts that render through a generic HTML converter.
pub fn html_document(theme: &Theme, html: &str) -> String {
    format!(
        "<style>{}</style><pre><code class=\"hljs\">{}</code></pre>",
        theme.css(),
        html
    )
}
