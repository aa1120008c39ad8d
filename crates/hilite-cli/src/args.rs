use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// hilite renders highlight.js HTML as themed terminal output
#[derive(Debug, Clone, Parser)]
#[command(name = "hilite", version, author)]
pub struct CliArguments {
    /// Read settings from a TOML file; flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Look for `<name>.css` themes in this directory before the built-in ones
    #[arg(long = "theme-dir", global = true, value_name = "DIR")]
    pub theme_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Sets the level of logging verbosity:
    /// -v = info, -vv = debug, -vvv = trace (RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbosity: u8,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Renders tokenizer HTML with a theme as ANSI escape sequences
    #[command(visible_alias = "r")]
    Render(RenderCommand),

    /// Lists the available themes
    Themes,

    /// Decodes a CSS color value and prints its channels
    Color(ColorCommand),
}

/// Renders tokenizer HTML with a theme
#[derive(Debug, Clone, Parser)]
pub struct RenderCommand {
    /// Input HTML file, or '-' for stdin
    pub input: Option<String>,

    /// Theme to apply
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Prefix every line with its number
    #[arg(short = 'n', long = "line-numbers")]
    pub line_numbers: bool,

    /// Number of the first line
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Minimum number of digits in line numbers
    #[arg(long = "min-width", value_name = "DIGITS")]
    pub min_width: Option<usize>,

    /// Text between a line number and the line
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,

    /// Use the line number color meant for dark themes
    #[arg(long)]
    pub dark: bool,

    /// Paint the theme background behind the output
    #[arg(long)]
    pub background: bool,
}

impl RenderCommand {
    /// Whether any flag asks for line numbers.
    pub fn wants_line_numbers(&self) -> bool {
        self.line_numbers
            || self.start.is_some()
            || self.min_width.is_some()
            || self.separator.is_some()
            || self.dark
    }
}

/// Decodes a CSS color value
#[derive(Debug, Clone, Parser)]
pub struct ColorCommand {
    /// A `#rgb`, `#rrggbb` or named color
    pub spec: String,
}
