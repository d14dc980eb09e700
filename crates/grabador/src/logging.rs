//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries only command output.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise the filter follows the
/// verbosity flags. A second call is a no-op.
pub fn init(config: &CliConfig) {
    let fallback = config.verbosity.log_filter();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(config.verbosity.is_verbose())
        .try_init();
}
