//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Grabador: CLI for Grabar - keeps recorded browser tests in sync with hand-written assertions
#[derive(Parser, Debug)]
#[command(name = "grabador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded session log through the source multiplexer
    Replay(ReplayArgs),

    /// Render one wait or assertion statement
    Snippet(SnippetArgs),

    /// List the available waits and assertions
    Catalog(CatalogArgs),

    /// Show the effective recorder configuration
    Config(ConfigArgs),
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Session log (YAML, or JSON with a .json extension)
    pub log: PathBuf,

    /// Persist the chosen file's document here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File id to print (defaults to the first one reported)
    #[arg(long = "file")]
    pub file: Option<String>,

    /// Replace the document wholesale on every update
    #[arg(long)]
    pub no_preserve: bool,

    /// Recorder configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the snippet command
#[derive(Parser, Debug)]
pub struct SnippetArgs {
    /// Wait or assertion kind (catalog id or alias)
    pub kind: String,

    /// Element selector or locator expression
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Parameter as key=value (repeatable); JSON values are parsed
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Emit a soft assertion
    #[arg(long)]
    pub soft: bool,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Only list one category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only list entries whose id or description matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Recorder configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
