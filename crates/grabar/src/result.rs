//! Result and error types for Grabar.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for Grabar operations
pub type GrabarResult<T> = Result<T, GrabarError>;

/// Errors that can occur in Grabar.
///
/// Only I/O-facing operations return these. Merging, coalescing and reveal
/// computation never fail; they record a [`Degradation`] instead.
#[derive(Debug, Error)]
pub enum GrabarError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Operation addressed a file with no open session
    #[error("No open session for file '{id}'")]
    UnknownFile {
        /// File id
        id: String,
    },

    /// A wait or assertion could not be built
    #[error("Code generation failed: {0}")]
    Codegen(#[from] grabar_codegen::CodegenError),
}

impl GrabarError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown file error
    #[must_use]
    pub fn unknown_file(id: impl Into<String>) -> Self {
        Self::UnknownFile { id: id.into() }
    }
}

/// A recoverable problem met while processing a tick.
///
/// Each one is logged at `warn` level and reported on the published source;
/// the tick still completes with a deterministic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Generated text has no recognizable block start or closing line; the
    /// document was replaced wholesale.
    StructuralParseFailure,
    /// A fill action's target could not be derived; it was appended instead
    /// of coalesced.
    CoalesceMismatch,
    /// The previous body had more mechanical slots than fresh statements; the
    /// surplus slots were dropped.
    MergeInvariantViolation,
}

impl Degradation {
    /// Stable snake_case name, as used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralParseFailure => "structural_parse_failure",
            Self::CoalesceMismatch => "coalesce_mismatch",
            Self::MergeInvariantViolation => "merge_invariant_violation",
        }
    }
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
