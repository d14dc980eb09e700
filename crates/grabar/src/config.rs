//! Recorder configuration.
//!
//! Controls how generated text is split into header, body and footer, how
//! statements are formatted, and how often snapshots are persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::{GrabarError, GrabarResult};

/// Default statement indentation
pub const DEFAULT_INDENT: &str = "  ";

/// Default marker of the line that opens the test body
pub const DEFAULT_BLOCK_START_MARKER: &str = "async";

/// Default throttle window for persisted writes
pub const DEFAULT_THROTTLE_MS: u64 = 250;

/// Default presentation title prefix
pub const DEFAULT_TITLE_PREFIX: &str = "Recorder";

/// Configuration for a recorder session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Indentation of body statements
    pub indent: String,
    /// Header ends at the first line containing this marker (inclusive)
    pub block_start_marker: String,
    /// The last non-blank line is the footer when its trimmed text starts
    /// with one of these
    pub footer_markers: Vec<String>,
    /// Prefix statements with `await` when they lack it
    pub await_prefix: bool,
    /// Minimum interval between persisted writes, in milliseconds
    pub throttle_ms: u64,
    /// Preserve manual lines when the driver does not say otherwise
    pub preserve_assertions: bool,
    /// Title shown by the presentation layer
    pub title_prefix: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            block_start_marker: DEFAULT_BLOCK_START_MARKER.to_string(),
            footer_markers: vec!["});".to_string(), "})".to_string(), "}".to_string()],
            await_prefix: true,
            throttle_ms: DEFAULT_THROTTLE_MS,
            preserve_assertions: true,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
        }
    }
}

impl RecorderConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the statement indentation
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the block start marker
    #[must_use]
    pub fn with_block_start_marker(mut self, marker: impl Into<String>) -> Self {
        self.block_start_marker = marker.into();
        self
    }

    /// Set the footer markers
    #[must_use]
    pub fn with_footer_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the `await` prefix
    #[must_use]
    pub const fn with_await_prefix(mut self, enabled: bool) -> Self {
        self.await_prefix = enabled;
        self
    }

    /// Set the persistence throttle window
    #[must_use]
    pub const fn with_throttle_ms(mut self, ms: u64) -> Self {
        self.throttle_ms = ms;
        self
    }

    /// Set the default for manual-line preservation
    #[must_use]
    pub const fn with_preserve_assertions(mut self, preserve: bool) -> Self {
        self.preserve_assertions = preserve;
        self
    }

    /// Set the title prefix
    #[must_use]
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    /// Check that the markers can split a document
    pub fn validate(&self) -> GrabarResult<()> {
        if self.block_start_marker.trim().is_empty() {
            return Err(GrabarError::config("block_start_marker must not be empty"));
        }
        if self.footer_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(GrabarError::config(
                "footer_markers must contain at least one non-empty marker",
            ));
        }
        if self.indent.chars().any(|c| !c.is_whitespace()) {
            return Err(GrabarError::config("indent must be whitespace only"));
        }
        Ok(())
    }

    /// Whether a trimmed line closes the test body
    #[must_use]
    pub fn is_footer_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.footer_markers
            .iter()
            .filter(|m| !m.trim().is_empty())
            .any(|m| trimmed.starts_with(m.trim()))
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> GrabarResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON
    pub fn from_json_str(json: &str) -> GrabarResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path) -> GrabarResult<Self> {
        let text = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> GrabarResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
