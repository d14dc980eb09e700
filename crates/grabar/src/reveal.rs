//! Which body line the editor should scroll to after an update.

use serde::{Deserialize, Serialize};

use crate::document::SourceDocumentModel;

/// Editor highlight style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    /// Recording
    #[default]
    Running,
    /// Recording paused
    Paused,
    /// The last tick degraded
    Error,
}

/// What kind of change produced the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Actions were recorded or regenerated
    Mechanical,
    /// A manual line was inserted at this body index
    Manual {
        /// Insertion index
        index: usize,
    },
}

/// Reveal target for one render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealState {
    /// Body index to reveal
    pub line_number: usize,
    /// Highlight style
    pub highlight_kind: HighlightKind,
}

impl RevealState {
    /// Set the highlight
    #[must_use]
    pub const fn with_highlight(mut self, highlight_kind: HighlightKind) -> Self {
        self.highlight_kind = highlight_kind;
        self
    }

    /// 1-based line in the rendered document. Body lines holding a
    /// multi-line statement count once per rendered line.
    #[must_use]
    pub fn document_line(&self, model: &SourceDocumentModel) -> usize {
        let before: usize = model
            .body
            .iter()
            .take(self.line_number)
            .map(|line| line.text.split('\n').count())
            .sum();
        model.header.len() + before + 1
    }
}

/// Compute the reveal line for `merged`.
///
/// Mechanical changes reveal the last mechanical line (the last line when
/// there is none); manual changes reveal the insertion index. The result is
/// clamped to `body_len - 1`, and is 0 for an empty body.
#[must_use]
pub fn compute_reveal(merged: &SourceDocumentModel, change: ChangeKind) -> RevealState {
    let len = merged.body_len();
    let candidate = match change {
        ChangeKind::Mechanical => merged
            .last_mechanical_index()
            .unwrap_or_else(|| len.saturating_sub(1)),
        ChangeKind::Manual { index } => index,
    };
    RevealState {
        line_number: candidate.min(len.saturating_sub(1)),
        highlight_kind: HighlightKind::Running,
    }
}
