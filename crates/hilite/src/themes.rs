//! Where theme stylesheets come from.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hilite_theme::builtin;
use tracing::{debug, warn};

/// A collection of named theme stylesheets.
pub trait ThemeSource {
    /// Stylesheet text of the named theme.
    fn load(&self, name: &str) -> Option<String>;

    /// Names of all themes this source can load.
    fn names(&self) -> Vec<String>;
}

impl<T: ThemeSource + ?Sized> ThemeSource for Box<T> {
    fn load(&self, name: &str) -> Option<String> {
        (**self).load(name)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}

/// The themes compiled into `hilite-theme`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinThemes;

impl ThemeSource for BuiltinThemes {
    fn load(&self, name: &str) -> Option<String> {
        builtin::get(name).map(str::to_string)
    }

    fn names(&self) -> Vec<String> {
        builtin::names().map(str::to_string).collect()
    }
}

/// `*.css` files in a directory; the theme name is the file stem.
#[derive(Debug, Clone)]
pub struct DirectoryThemes {
    dir: PathBuf,
}

impl DirectoryThemes {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ThemeSource for DirectoryThemes {
    fn load(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            debug!(name, "rejecting theme name that is not a plain file stem");
            return None;
        }
        let path = self.dir.join(format!("{name}.css"));
        match fs::read_to_string(&path) {
            Ok(source) => Some(source),
            Err(err) => {
                debug!(path = %path.display(), %err, "theme file not readable");
                None
            }
        }
    }

    fn names(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %self.dir.display(), %err, "cannot list theme directory");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "css"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Themes held in memory, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemes {
    themes: BTreeMap<String, String>,
}

impl MemoryThemes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.themes.insert(name.into(), source.into());
    }

    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }
}

impl<N: Into<String>, S: Into<String>> FromIterator<(N, S)> for MemoryThemes {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        Self {
            themes: iter.into_iter().map(|(n, s)| (n.into(), s.into())).collect(),
        }
    }
}

impl ThemeSource for MemoryThemes {
    fn load(&self, name: &str) -> Option<String> {
        self.themes.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }
}

/// Several sources searched in order; the first one with a theme wins.
#[derive(Default)]
pub struct LayeredThemes {
    layers: Vec<Box<dyn ThemeSource>>,
}

impl LayeredThemes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source searched after the ones already added.
    pub fn with(mut self, source: impl ThemeSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl ThemeSource for LayeredThemes {
    fn load(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.load(name))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.layers.iter().flat_map(|layer| layer.names()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
