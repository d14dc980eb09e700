//! Collapse consecutive same-target fills.
//!
//! Only the immediate predecessor is ever compared: a fill on `#a`, then a
//! click, then another fill on `#a` keeps both fills.

use crate::action::Action;

/// What happened to the newest action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coalesced {
    /// No action this tick; history unchanged
    Unchanged,
    /// Appended as a new entry
    Appended,
    /// Replaced the previous fill on the same target
    Replaced,
    /// A fill whose target could not be derived; appended
    Mismatch,
}

/// Coalesce `newest` onto a copy of `history`.
///
/// The result has `history.len()` or `history.len() + 1` entries.
#[must_use]
pub fn coalesce(history: &[Action], newest: Option<Action>) -> Vec<Action> {
    let mut out = history.to_vec();
    if let Some(newest) = newest {
        push_coalesced(&mut out, newest);
    }
    out
}

/// Coalesce `newest` onto `history` in place.
pub fn push_coalesced(history: &mut Vec<Action>, newest: Action) -> Coalesced {
    if !newest.is_fill() {
        history.push(newest);
        return Coalesced::Appended;
    }
    let Some(key) = newest.target_key() else {
        tracing::trace!(action = newest.text(), "fill without target key, appending");
        history.push(newest);
        return Coalesced::Mismatch;
    };
    let same_target = history
        .last()
        .is_some_and(|last| last.is_fill() && last.target_key() == Some(key));
    if !same_target {
        history.push(newest);
        return Coalesced::Appended;
    }
    tracing::trace!(target_key = key, "coalescing fill onto previous");
    if let Some(last) = history.last_mut() {
        *last = newest;
    }
    Coalesced::Replaced
}

/// Fold [`push_coalesced`] over a whole list.
#[must_use]
pub fn collapse<I>(actions: I) -> Vec<Action>
where
    I: IntoIterator<Item = Action>,
{
    actions.into_iter().fold(Vec::new(), |mut acc, action| {
        push_coalesced(&mut acc, action);
        acc
    })
}
