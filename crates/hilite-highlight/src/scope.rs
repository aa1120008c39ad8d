//! The stack of open classes during decoding.

use hilite_theme::{BASE_SCOPE, Style, Theme};
use tracing::debug;

#[derive(Debug, Clone)]
struct Scope {
    classes: String,
    style: Style,
}

/// Open classes, outermost first, with the composed style of each level
/// cached so that styling text never walks the whole stack.
///
/// The bottom entry is always the base scope (`hljs`); it can't be popped.
#[derive(Debug, Clone)]
pub struct ScopeStack<'t> {
    theme: &'t Theme,
    scopes: Vec<Scope>,
}

impl<'t> ScopeStack<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        let mut style = theme.base_style();
        theme.apply_class(&mut style, BASE_SCOPE);
        Self {
            theme,
            scopes: vec![Scope {
                classes: BASE_SCOPE.to_string(),
                style,
            }],
        }
    }

    /// Open a scope. `classes` is the raw `class` attribute; when it holds
    /// several names they are applied left to right.
    pub fn push(&mut self, classes: &str) {
        let mut style = self.style().clone();
        for class in classes.split_ascii_whitespace() {
            self.theme.apply_class(&mut style, class);
        }
        self.scopes.push(Scope {
            classes: classes.to_string(),
            style,
        });
    }

    /// Close the innermost scope. Closing with only the base scope left is
    /// a no-op; returns whether anything was popped.
    pub fn pop(&mut self) -> bool {
        if self.scopes.len() <= 1 {
            debug!("close without open span, ignoring");
            return false;
        }
        self.scopes.pop();
        true
    }

    /// Number of open scopes, including the base scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The composed style of the innermost scope.
    pub fn style(&self) -> &Style {
        // The base scope is never popped.
        &self.scopes[self.scopes.len() - 1].style
    }

    /// Class attributes of the open scopes, outermost first.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(|scope| scope.classes.as_str())
    }
}
