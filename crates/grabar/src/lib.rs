//! Grabar: incremental source merging for browser test recorders
//!
//! Grabar (Spanish: "to record") keeps a live, regenerated test script in
//! sync with the action stream of a recorder while preserving the waits and
//! assertions a user inserted by hand.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       GRABAR Pipeline                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  driver tick                                                     │
//! │  (actions, text)                                                 │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  ┌──────────┐   ┌──────────────┐   ┌────────┐   ┌────────┐       │
//! │  │ coalesce │──►│ document     │──►│ merge  │──►│ reveal │──► UI │
//! │  │ (fills)  │   │ (hdr/body/ft)│   │ (keep  │   │ (line) │       │
//! │  └──────────┘   └──────────────┘   │ manual)│   └────────┘       │
//! │                                    └────────┘                    │
//! │  SourceMultiplexer owns one SessionStore entry per file id       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use grabar::prelude::*;
//!
//! let text = "test('t', async ({ page }) => {\n  await page.click('#a');\n});";
//! let mut mux = SourceMultiplexer::default();
//! mux.on_sources_updated(
//!     &[SourceUpdate::new("main", text).with_actions(["await page.click('#a');"])],
//!     None,
//! );
//! let published = mux
//!     .insert_manual("main", "await expect(page.locator('#a')).toBeVisible();")
//!     .unwrap();
//! assert_eq!(published.reveal.line_number, 1);
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod coalesce;
pub mod config;
pub mod document;
pub mod merge;
pub mod multiplexer;
pub mod persist;
pub mod result;
pub mod reveal;
pub mod session;
pub mod update;

pub use action::{Action, ActionKind};
pub use coalesce::{coalesce, collapse, Coalesced};
pub use config::RecorderConfig;
pub use document::{LineOrigin, SourceDocumentModel, StatementLine};
pub use merge::{merge, merge_with_report, MergeOutcome, MergeReport};
pub use multiplexer::SourceMultiplexer;
pub use persist::ThrottledWriter;
pub use result::{Degradation, GrabarError, GrabarResult};
pub use reveal::{compute_reveal, ChangeKind, HighlightKind, RevealState};
pub use session::{FileSession, SessionPhase, SessionStore};
pub use update::{PublishedBatch, PublishedSource, SourceUpdate, UpdateMeta};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::action::*;
    pub use super::coalesce::*;
    pub use super::config::RecorderConfig;
    pub use super::document::*;
    pub use super::merge::*;
    pub use super::multiplexer::*;
    pub use super::persist::*;
    pub use super::result::*;
    pub use super::reveal::*;
    pub use super::session::*;
    pub use super::update::*;
    pub use grabar_codegen::{Params, Step, StepBuilder};
}
