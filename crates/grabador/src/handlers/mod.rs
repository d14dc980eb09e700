//! Command handlers - kept out of main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command
//! plus the pure helpers it is built from.

pub mod catalog;
pub mod config;
pub mod replay;
pub mod snippet;

pub use catalog::{execute_catalog, render_text, select_entries};
pub use config::{effective_config, execute_config};
pub use replay::{execute_replay, replay, ReplayOutcome};
pub use snippet::{execute_snippet, parse_params, render_snippet};
