//! Replay command handler
//!
//! Feeds a recorded session log through a [`SourceMultiplexer`] exactly as a
//! recorder UI would, persisting the chosen file through a
//! [`ThrottledWriter`].

use console::style;
use grabar::{PublishedSource, RecorderConfig, SourceMultiplexer, ThrottledWriter};

use crate::commands::{OutputFormat, ReplayArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::config::effective_config;
use crate::session_log::{SessionEvent, SessionLog};

/// Result of replaying a session log
#[derive(Debug, Clone, Default)]
pub struct ReplayOutcome {
    /// Number of events applied
    pub events: usize,
    /// Window title of the last driver update
    pub title: Option<String>,
    /// Latest snapshot of the chosen file
    pub last: Option<PublishedSource>,
}

/// Execute the replay command
pub fn execute_replay(config: &CliConfig, args: &ReplayArgs) -> CliResult<()> {
    let mut recorder = effective_config(args.config.as_deref())?;
    if args.no_preserve {
        recorder = recorder.with_preserve_assertions(false);
    }
    let log = SessionLog::load(&args.log)?;
    let file = args
        .file
        .clone()
        .or_else(|| log.first_file_id().map(str::to_string))
        .ok_or_else(|| CliError::invalid_argument("session log reports no sources"))?;

    let mut writer = ThrottledWriter::new(recorder.throttle_ms);
    writer.set_path(args.output.clone())?;

    let outcome = replay(&log, &file, recorder, &mut writer)?;
    writer.flush()?;

    let published = outcome
        .last
        .as_ref()
        .ok_or_else(|| CliError::invalid_argument(format!("no source recorded for '{file}'")))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(published)?),
        OutputFormat::Text => {
            if !config.verbosity.is_quiet() {
                let title = outcome.title.as_deref().unwrap_or(&published.id);
                let header = format!(
                    "{title} [{} events, reveal line {}]",
                    outcome.events, published.reveal_line
                );
                if config.color.should_color() {
                    eprintln!("{}", style(header).bold());
                } else {
                    eprintln!("{header}");
                }
            }
            println!("{}", published.text);
        }
    }
    Ok(())
}

/// Apply every event of `log` to a fresh multiplexer.
///
/// Snapshots of `file` are handed to `writer` as they are produced.
pub fn replay(
    log: &SessionLog,
    file: &str,
    config: RecorderConfig,
    writer: &mut ThrottledWriter,
) -> CliResult<ReplayOutcome> {
    let mut mux = SourceMultiplexer::new(config);
    let mut outcome = ReplayOutcome::default();

    for event in &log.events {
        let snapshot = match event {
            SessionEvent::Sources { sources, meta } => {
                let batch = mux.on_sources_updated(sources, meta.as_ref());
                outcome.title = Some(batch.title.clone());
                batch.source(file).cloned()
            }
            SessionEvent::Insert { file: target, code } => {
                Some(mux.insert_manual(target, code)?).filter(|p| p.id == file)
            }
            SessionEvent::Step {
                file: target,
                kind,
                selector,
                params,
            } => Some(mux.insert_payload(target, kind, selector.as_deref(), params)?)
                .filter(|p| p.id == file),
            SessionEvent::Pause => {
                mux.set_paused(true);
                mux.publish(file)
            }
            SessionEvent::Resume => {
                mux.set_paused(false);
                mux.publish(file)
            }
            SessionEvent::Close { file: target } => {
                mux.close_file(target);
                None
            }
        };
        outcome.events += 1;

        if let Some(published) = snapshot {
            tracing::debug!(
                file_id = %published.id,
                reveal = published.reveal.line_number,
                degraded = published.is_degraded(),
                "published snapshot"
            );
            writer.set_content(published.text.clone());
            writer.poll()?;
            outcome.last = Some(published);
        }
    }
    Ok(outcome)
}
