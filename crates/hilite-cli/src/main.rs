mod args;

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use hilite::{
    AnsiOptions, BuiltinThemes, Color, Config, DirectoryThemes, Error, GenericFonts, Highlighter,
    LayeredThemes, LineNumberConfig, ThemeSource, TokenizeError, Tokenizer, runs_to_ansi,
};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{CliArguments, ColorCommand, Command, RenderCommand};

/// `render` reads what a tokenizer already produced, so tokenizing passes
/// the input through unchanged.
struct Pretokenized;

impl Tokenizer for Pretokenized {
    fn tokenize(&self, html: &str, _: Option<&str>, _: bool) -> Result<String, TokenizeError> {
        Ok(html.to_string())
    }

    fn languages(&self) -> Vec<String> {
        Vec::new()
    }
}

fn main() -> ExitCode {
    let args = CliArguments::parse();
    init_tracing(args.verbosity);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .without_time()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &CliArguments) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match &args.command {
        Command::Render(command) => {
            let html = read_input(command.input.as_deref())?;
            let options = AnsiOptions::default();
            let ansi = render(&html, config, theme_source(args), command, options)?;
            io::stdout().write_all(ansi.as_bytes())?;
        }
        Command::Themes => {
            for name in theme_source(args).names() {
                if name == config.theme {
                    println!("{} {}", name.bold(), "(configured)".dimmed());
                } else {
                    println!("{name}");
                }
            }
        }
        Command::Color(command) => println!("{}", describe_color(command)),
    }
    Ok(())
}

/// Themes from `--theme-dir` first, then the built-in ones.
fn theme_source(args: &CliArguments) -> LayeredThemes {
    let themes = LayeredThemes::new();
    match &args.theme_dir {
        Some(dir) => themes.with(DirectoryThemes::new(dir)).with(BuiltinThemes),
        None => themes.with(BuiltinThemes),
    }
}

fn read_input(input: Option<&str>) -> Result<String, Error> {
    match input {
        None | Some("-") => Ok(io::read_to_string(io::stdin())?),
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

/// Command-line flags win over the configuration file.
fn apply_render_flags(config: &mut Config, command: &RenderCommand) {
    // There is no HTML renderer in a terminal.
    config.fast_render = true;

    if let Some(theme) = &command.theme {
        config.theme = theme.clone();
    }
    if !command.wants_line_numbers() {
        return;
    }

    let numbers = config.line_numbers.get_or_insert_with(LineNumberConfig::new);
    if let Some(start) = command.start {
        numbers.set_start(start);
    }
    if let Some(width) = command.min_width {
        numbers.set_min_width(width);
    }
    if let Some(separator) = &command.separator {
        numbers.set_separator(separator.as_str());
    }
    if command.dark {
        numbers.set_dark(true);
    }
}

fn render(
    html: &str,
    mut config: Config,
    themes: impl ThemeSource + 'static,
    command: &RenderCommand,
    mut options: AnsiOptions,
) -> Result<String, Error> {
    apply_render_flags(&mut config, command);
    debug!(theme = %config.theme, numbered = config.line_numbers.is_some(), "rendering");

    let highlighter = Highlighter::with_config(Pretokenized, themes, GenericFonts, config)?;
    let runs = highlighter.highlight(html, None)?;

    if command.background {
        options = options.with_background(highlighter.theme().background());
    }
    Ok(runs_to_ansi(&runs, &options))
}

fn describe_color(command: &ColorCommand) -> String {
    let color = Color::from_css(&command.spec);
    let (r, g, b) = color.to_rgb8();
    format!(
        "{} {} rgba({:.3}, {:.3}, {:.3}, {:.3})",
        "    ".on_truecolor(r, g, b),
        color.to_hex(),
        color.r,
        color.g,
        color.b,
        color.a
    )
}
