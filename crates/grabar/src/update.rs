//! Payloads exchanged with the driver and the presentation layer.

use serde::{Deserialize, Serialize};

use crate::result::Degradation;
use crate::reveal::RevealState;
use crate::session::SessionPhase;

/// One generated source as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUpdate {
    /// File id
    pub id: String,
    /// Full generated text
    pub text: String,
    /// Every action recorded so far, oldest first
    #[serde(default)]
    pub actions: Vec<String>,
}

impl SourceUpdate {
    /// Create an update
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            actions: Vec::new(),
        }
    }

    /// Set the reported actions
    #[must_use]
    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }
}

/// Metadata accompanying a batch of updates.
///
/// Older drivers send only the primary page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateMeta {
    /// Primary page URL
    Url(String),
    /// Options object
    Options {
        /// Primary page URL
        #[serde(
            rename = "primaryPageURL",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        primary_page_url: Option<String>,
        /// Engage the merge (`true`) or replace wholesale (`false`)
        #[serde(
            rename = "preserveAssertions",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        preserve_assertions: Option<bool>,
    },
}

impl UpdateMeta {
    /// The primary page URL, if any
    #[must_use]
    pub fn primary_page_url(&self) -> Option<&str> {
        let url = match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Options {
                primary_page_url, ..
            } => primary_page_url.as_deref(),
        };
        url.filter(|url| !url.is_empty())
    }

    /// Whether to merge, falling back to `default` when unspecified
    #[must_use]
    pub fn preserve_assertions(&self, default: bool) -> bool {
        match self {
            Self::Url(_) => default,
            Self::Options {
                preserve_assertions,
                ..
            } => preserve_assertions.unwrap_or(default),
        }
    }
}

/// Snapshot of one file for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedSource {
    /// File id
    pub id: String,
    /// Newline-joined document
    pub text: String,
    /// Body line to reveal and how to highlight it
    pub reveal: RevealState,
    /// 1-based document line of the reveal
    pub reveal_line: usize,
    /// Session phase after the update
    pub phase: SessionPhase,
    /// Problems met during the update
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<Degradation>,
}

impl PublishedSource {
    /// Whether the update degraded
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Every source published for one driver update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedBatch {
    /// Window title
    pub title: String,
    /// One entry per reported source, in driver order
    pub sources: Vec<PublishedSource>,
}

impl PublishedBatch {
    /// Find a source by id
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&PublishedSource> {
        self.sources.iter().find(|s| s.id == id)
    }
}

/// Window title: `"<prefix> - <url>"`, or just the prefix without a URL
#[must_use]
pub fn title(prefix: &str, meta: Option<&UpdateMeta>) -> String {
    match meta.and_then(UpdateMeta::primary_page_url) {
        Some(url) => format!("{prefix} - {url}"),
        None => prefix.to_string(),
    }
}
