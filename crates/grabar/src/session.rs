//! Per-file recorder state, keyed by file id.
//!
//! ```text
//! EMPTY ──first tick──► GENERATING ──next tick──► STEADY ─┐
//!   ▲                                               ▲     │ tick
//!   └──────────── close / reset ─────────────────── ┴─────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::document::SourceDocumentModel;
use crate::result::Degradation;
use crate::reveal::RevealState;

/// Lifecycle of one file session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No state held
    #[default]
    Empty,
    /// First tick processed; nothing to merge against yet
    Generating,
    /// Merging against the previous model
    Steady,
}

/// State held for one open file
#[derive(Debug, Clone, Default)]
pub struct FileSession {
    /// Last published model, merged against on the next tick
    pub model: Option<SourceDocumentModel>,
    /// Coalesced action history
    pub history: Vec<Action>,
    /// Action list the driver reported last, to detect repeated reports
    pub reported: Vec<String>,
    /// Reveal of the last update
    pub reveal: RevealState,
    /// Degradations of the last update
    pub degraded: Vec<Degradation>,
    /// Phase
    pub phase: SessionPhase,
}

impl FileSession {
    /// Move to the phase that follows a processed tick
    pub fn advance(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Empty => SessionPhase::Generating,
            SessionPhase::Generating | SessionPhase::Steady => SessionPhase::Steady,
        };
    }
}

/// Owned store of every open file session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: BTreeMap<String, FileSession>,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for `id`, if open
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FileSession> {
        self.sessions.get(id)
    }

    /// Mutable session for `id`, if open
    pub fn get_mut(&mut self, id: &str) -> Option<&mut FileSession> {
        self.sessions.get_mut(id)
    }

    /// Session for `id`, opened empty when absent
    pub fn open(&mut self, id: &str) -> &mut FileSession {
        self.sessions.entry(id.to_string()).or_default()
    }

    /// Phase of `id`; `Empty` when no session is held
    #[must_use]
    pub fn phase(&self, id: &str) -> SessionPhase {
        self.get(id).map_or(SessionPhase::Empty, |s| s.phase)
    }

    /// Discard the session for `id`; returns whether one was held
    pub fn close(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Discard every session
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Open file ids, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    /// Number of open sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is open
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
