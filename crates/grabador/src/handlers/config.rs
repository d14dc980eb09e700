//! Config command handler

use std::path::Path;

use grabar::{GrabarError, RecorderConfig};

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let recorder = effective_config(args.config.as_deref())?;
    if config.verbosity.is_verbose() {
        match &args.config {
            Some(path) => eprintln!("# loaded from {}", path.display()),
            None => eprintln!("# built-in defaults"),
        }
    }
    print!("{}", recorder.to_yaml()?);
    Ok(())
}

/// Load and validate the recorder configuration, or use the defaults
pub fn effective_config(path: Option<&Path>) -> CliResult<RecorderConfig> {
    let Some(path) = path else {
        return Ok(RecorderConfig::default());
    };
    RecorderConfig::load(path).map_err(|e| match e {
        GrabarError::Config { message } => {
            CliError::config(format!("{}: {message}", path.display()))
        }
        other => other.into(),
    })
}
