//! CLI argument definitions for pyproject-migrate.
//!
//! All clap derive structs live here. The [`Cli`] struct is the top-level
//! parser; [`Commands`] enumerates every subcommand.

use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};

use crate::manifest::writer::DEFAULT_LINE_WIDTH;
use crate::manifest::{ContentType, InvalidContentType};

/// Help menu colors.
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Migrate setuptools configuration to pyproject.toml.
#[derive(Parser, Debug)]
#[command(
    name = "pyproject-migrate",
    author,
    version,
    about = "Migrate setuptools configuration to pyproject.toml.",
    styles = STYLES,
    after_help = "Use `pyproject-migrate help <command>` for more information on a specific command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity.
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(global = true, short, long)]
    pub quiet: bool,
}

/// Top-level subcommands for pyproject-migrate.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a setup.cfg (or a JSON dump of setup() arguments) into
    /// pyproject.toml.
    Convert(ConvertArgs),

    /// Print the legacy configuration as read, before translation.
    Dump(DumpArgs),
}

impl Commands {
    /// Return the subcommand name as a static string (for diagnostics).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert(_) => "convert",
            Self::Dump(_) => "dump",
        }
    }
}

/// Where the legacy configuration comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// A project directory containing `setup.cfg`, or the `setup.cfg` itself.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read `setup()` keyword arguments from a JSON file instead of
    /// `setup.cfg`.
    #[arg(long, value_name = "FILE")]
    pub from_json: Option<PathBuf>,
}

/// Arguments for `pyproject-migrate convert`.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Content type of the readme, overriding the declared one.
    ///
    /// `auto` keeps the declared type or infers it from the file extension.
    #[arg(long, value_name = "TYPE")]
    pub readme_content_type: Option<ReadmeContentType>,

    /// Embed the readme text instead of referencing its file.
    #[arg(long)]
    pub embed_readme: bool,

    /// Wrap arrays that do not fit in this many columns.
    #[arg(
        long,
        env = "PYPROJECT_MIGRATE_LINE_WIDTH",
        default_value_t = DEFAULT_LINE_WIDTH,
        value_name = "N"
    )]
    pub line_width: usize,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `pyproject-migrate dump`.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// The value of `--readme-content-type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeContentType {
    Auto,
    Explicit(ContentType),
}

impl ReadmeContentType {
    pub fn into_override(self) -> Option<ContentType> {
        match self {
            Self::Auto => None,
            Self::Explicit(content_type) => Some(content_type),
        }
    }
}

impl FromStr for ReadmeContentType {
    type Err = InvalidContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse().map(Self::Explicit)
    }
}
