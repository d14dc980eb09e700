//! Error types for `grabar-codegen`.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while building a wait or assertion step.
///
/// Rendering itself never fails; every error is raised while turning a
/// loosely-typed dialog payload into a typed [`crate::Step`].
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The payload named a kind that is not in the catalog
    #[error("Unknown step kind '{id}'")]
    UnknownKind {
        /// The unrecognised kind id
        id: String,
    },

    /// A required parameter was absent from the payload
    #[error("Missing parameter '{param}' for '{kind}'")]
    MissingParam {
        /// Kind id being built
        kind: String,
        /// Parameter name
        param: String,
    },

    /// A parameter was present but could not be interpreted
    #[error("Invalid parameter '{param}' for '{kind}': {reason}")]
    InvalidParam {
        /// Kind id being built
        kind: String,
        /// Parameter name
        param: String,
        /// Why it was rejected
        reason: String,
    },

    /// An element-level step was built without a selector
    #[error("Step '{kind}' requires an element selector")]
    EmptyTarget {
        /// Kind id being built
        kind: String,
    },

    /// JSON error while decoding a payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Create a missing parameter error
    #[must_use]
    pub fn missing(kind: &str, param: &str) -> Self {
        Self::MissingParam {
            kind: kind.to_string(),
            param: param.to_string(),
        }
    }

    /// Create an invalid parameter error
    #[must_use]
    pub fn invalid(kind: &str, param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            kind: kind.to_string(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}
