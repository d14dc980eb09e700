//! Driver-facing entry point: coalesce, merge, reveal, publish.
//!
//! The multiplexer exclusively owns every file's model and action history.
//! Callers only ever receive snapshots.

use grabar_codegen::{Params, Step, StepBuilder};

use crate::action::{format_statement, Action};
use crate::coalesce::{collapse, push_coalesced, Coalesced};
use crate::config::RecorderConfig;
use crate::document::SourceDocumentModel;
use crate::merge::merge_with_report;
use crate::result::{Degradation, GrabarError, GrabarResult};
use crate::reveal::{compute_reveal, ChangeKind, HighlightKind};
use crate::session::{SessionPhase, SessionStore};
use crate::update::{title, PublishedBatch, PublishedSource, SourceUpdate, UpdateMeta};

/// Reconciles driver updates against what is displayed, per file
#[derive(Debug, Clone, Default)]
pub struct SourceMultiplexer {
    config: RecorderConfig,
    store: SessionStore,
    paused: bool,
}

impl SourceMultiplexer {
    /// Create a multiplexer
    #[must_use]
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            store: SessionStore::new(),
            paused: false,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Process one tick for `file_id` and return the resulting model.
    ///
    /// `new_action` is the single action the driver appended this tick, if
    /// any; `fresh_text` is its full regenerated source.
    pub fn on_tick(
        &mut self,
        file_id: &str,
        new_action: Option<Action>,
        fresh_text: &str,
    ) -> SourceDocumentModel {
        let preserve = self.config.preserve_assertions;
        self.tick(file_id, new_action, fresh_text, preserve);
        self.model(file_id)
            .cloned()
            .unwrap_or_else(|| SourceDocumentModel::unstructured(file_id, fresh_text))
    }

    /// Process a driver update carrying one or more sources.
    ///
    /// The newest action of each source is the last entry of its action
    /// list, unless the list repeats the previous report. On first sight of
    /// a file the whole list is collapsed into its history.
    pub fn on_sources_updated(
        &mut self,
        sources: &[SourceUpdate],
        meta: Option<&UpdateMeta>,
    ) -> PublishedBatch {
        let default = self.config.preserve_assertions;
        let preserve = meta.map_or(default, |m| m.preserve_assertions(default));
        let mut published = Vec::with_capacity(sources.len());
        for source in sources {
            let newest = self.driver_cursor(source);
            self.tick(&source.id, newest, &source.text, preserve);
            if let Some(snapshot) = self.publish(&source.id) {
                published.push(snapshot);
            }
        }
        PublishedBatch {
            title: title(&self.config.title_prefix, meta),
            sources: published,
        }
    }

    /// Insert user-supplied code as manual lines at the end of the body.
    pub fn insert_manual(&mut self, file_id: &str, code: &str) -> GrabarResult<PublishedSource> {
        let config = &self.config;
        let session = self
            .store
            .get_mut(file_id)
            .ok_or_else(|| GrabarError::unknown_file(file_id))?;
        let model = session
            .model
            .as_mut()
            .ok_or_else(|| GrabarError::unknown_file(file_id))?;

        let mut lines = code.lines().map(str::trim).filter(|l| !l.is_empty());
        if let Some(first) = lines.next() {
            // Without structure the last line is taken as the closing line.
            let mut index = if model.is_structured() {
                model.body_len()
            } else {
                model.body_len().saturating_sub(1)
            };
            index = model.insert_manual(index, format_statement(first, config));
            for line in lines {
                index = model.insert_manual(index + 1, format!("{}{line}", config.indent));
            }
            session.reveal = compute_reveal(model, ChangeKind::Manual { index });
            session.degraded.clear();
            tracing::debug!(file_id, index, "inserted manual statement");
        }
        self.publish(file_id)
            .ok_or_else(|| GrabarError::unknown_file(file_id))
    }

    /// Render a typed wait or assertion and insert it as manual.
    pub fn insert_step(&mut self, file_id: &str, step: &Step) -> GrabarResult<PublishedSource> {
        let code = grabar_codegen::render(step);
        self.insert_manual(file_id, &code)
    }

    /// Build a step from a dialog payload and insert it as manual.
    pub fn insert_payload(
        &mut self,
        file_id: &str,
        kind: &str,
        selector: Option<&str>,
        params: &Params,
    ) -> GrabarResult<PublishedSource> {
        if self.store.get(file_id).is_none() {
            return Err(GrabarError::unknown_file(file_id));
        }
        let step = StepBuilder::from_payload(kind, selector, params)?;
        self.insert_step(file_id, &step)
    }

    /// Snapshot of `file_id` for the presentation layer
    #[must_use]
    pub fn publish(&self, file_id: &str) -> Option<PublishedSource> {
        let session = self.store.get(file_id)?;
        let model = session.model.as_ref()?;
        let reveal = session
            .reveal
            .with_highlight(highlight(&session.degraded, self.paused));
        Some(PublishedSource {
            id: file_id.to_string(),
            text: model.text(),
            reveal,
            reveal_line: reveal.document_line(model),
            phase: session.phase,
            degraded: session.degraded.clone(),
        })
    }

    /// Pause or resume; affects the highlight of later snapshots
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether recording is paused
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Discard the state of one file; returns whether it was open
    pub fn close_file(&mut self, file_id: &str) -> bool {
        let closed = self.store.close(file_id);
        if closed {
            tracing::debug!(file_id, "closed file session");
        }
        closed
    }

    /// Discard every file's state
    pub fn reset(&mut self) {
        self.store.clear();
        self.paused = false;
    }

    /// Held model for `file_id`
    #[must_use]
    pub fn model(&self, file_id: &str) -> Option<&SourceDocumentModel> {
        self.store.get(file_id)?.model.as_ref()
    }

    /// Coalesced history for `file_id`
    #[must_use]
    pub fn history(&self, file_id: &str) -> &[Action] {
        self.store
            .get(file_id)
            .map(|s| s.history.as_slice())
            .unwrap_or_default()
    }

    /// Phase of `file_id`
    #[must_use]
    pub fn phase(&self, file_id: &str) -> SessionPhase {
        self.store.phase(file_id)
    }

    /// Open file ids
    pub fn open_files(&self) -> impl Iterator<Item = &str> {
        self.store.ids()
    }

    fn driver_cursor(&mut self, source: &SourceUpdate) -> Option<Action> {
        let session = self.store.open(&source.id);
        if session.phase == SessionPhase::Empty {
            session.history = collapse(source.actions.iter().filter_map(|a| Action::parse(a)));
            session.reported.clone_from(&source.actions);
            return None;
        }
        if source.actions.is_empty() || source.actions == session.reported {
            return None;
        }
        session.reported.clone_from(&source.actions);
        source.actions.last().and_then(|a| Action::parse(a))
    }

    fn tick(
        &mut self,
        file_id: &str,
        new_action: Option<Action>,
        fresh_text: &str,
        preserve: bool,
    ) {
        let config = &self.config;
        let session = self.store.open(file_id);
        let mut degraded = Vec::new();

        if let Some(action) = new_action {
            let text = action.text().to_string();
            if push_coalesced(&mut session.history, action) == Coalesced::Mismatch {
                tracing::warn!(
                    file_id,
                    reason = Degradation::CoalesceMismatch.as_str(),
                    action = %text,
                    "could not derive fill target; appended"
                );
                degraded.push(Degradation::CoalesceMismatch);
            }
        }

        let fresh = SourceDocumentModel::generate(file_id, fresh_text, &session.history, config);
        let previous = if preserve { session.model.as_ref() } else { None };
        let outcome = merge_with_report(previous, fresh);
        degraded.extend(outcome.report.degradations);

        session.reveal = compute_reveal(&outcome.model, ChangeKind::Mechanical);
        session.model = Some(outcome.model);
        session.degraded = degraded;
        session.advance();
    }
}

fn highlight(degraded: &[Degradation], paused: bool) -> HighlightKind {
    if !degraded.is_empty() {
        HighlightKind::Error
    } else if paused {
        HighlightKind::Paused
    } else {
        HighlightKind::Running
    }
}
