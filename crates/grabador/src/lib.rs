//! Grabador: CLI for Grabar
//!
//! Replays recorded recorder sessions through the source multiplexer,
//! renders individual waits and assertions, and lists the catalog.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod session_log;

pub use commands::{
    CatalogArgs, Cli, ColorArg, Commands, ConfigArgs, OutputFormat, ReplayArgs, SnippetArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use session_log::{SessionEvent, SessionLog};
