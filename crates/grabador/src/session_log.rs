//! Recorded recorder sessions.
//!
//! A session log is a list of the events a recorder UI delivered, in order:
//!
//! ```yaml
//! - event: sources
//!   sources:
//!     - id: main
//!       text: "test('t', async ({ page }) => {\n  await page.click('#a');\n});"
//!       actions: ["await page.click('#a');"]
//!   meta: https://example.com/
//! - event: pause
//! - event: step
//!   file: main
//!   kind: toBeVisible
//!   selector: "#a"
//! - event: resume
//! ```

use std::fs;
use std::path::Path;

use grabar::{SourceUpdate, UpdateMeta};
use grabar_codegen::Params;
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// One event delivered to the multiplexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Driver update with one or more regenerated sources
    Sources {
        /// Reported sources
        sources: Vec<SourceUpdate>,
        /// Batch metadata
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<UpdateMeta>,
    },
    /// Free-form code typed by the user
    Insert {
        /// Target file id
        file: String,
        /// Code to insert
        code: String,
    },
    /// Wait or assertion chosen from the dialog
    Step {
        /// Target file id
        file: String,
        /// Catalog id or alias
        kind: String,
        /// Element selector
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
        /// Dialog parameters
        #[serde(default, skip_serializing_if = "Params::is_empty")]
        params: Params,
    },
    /// Recording paused
    Pause,
    /// Recording resumed
    Resume,
    /// Editor tab closed
    Close {
        /// File id
        file: String,
    },
}

/// An ordered list of session events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    /// Events, oldest first
    pub events: Vec<SessionEvent>,
}

impl SessionLog {
    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a log; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// First file id reported by any `sources` event
    #[must_use]
    pub fn first_file_id(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            SessionEvent::Sources { sources, .. } => sources.first().map(|s| s.id.as_str()),
            _ => None,
        })
    }
}
