//! Unified Error Type System
//!
//! Centralized error types for the entire engine.
//!
//! ## Error Taxonomy
//!
//! - **MissingCredential**: no usable API credential at gateway construction (fail fast)
//! - **BackendUnavailable**: transport/network failure reaching the backend (no silent retry)
//! - **MalformedResponse**: backend text could not be parsed after fence stripping
//! - **NoMediaReturned**: a generation call succeeded but produced no payload
//! - **GenerationFailed**: the backend reported a failed long-running operation
//!
//! ## Design Principles
//!
//! - Single unified error type (VeriscanError) for the entire crate
//! - Partial-field absence in a parsed record is NOT an error: the
//!   normalizer substitutes defaults; only an unparsable document fails
//! - No panic/unwrap in non-test code - all errors are recoverable by the caller

use thiserror::Error;

/// Maximum characters of backend text retained in a `MalformedResponse`
const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum VeriscanError {
    // -------------------------------------------------------------------------
    // Gateway Errors
    // -------------------------------------------------------------------------
    /// No usable credential was resolvable from configuration.
    /// Raised before any network attempt, never retried.
    #[error("no API credential configured: set GEMINI_API_KEY or gateway.api_key")]
    MissingCredential,

    /// Transport failure reaching the backend. Propagated unchanged;
    /// retry policy, if any, belongs to the caller.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    // -------------------------------------------------------------------------
    // Extraction Errors
    // -------------------------------------------------------------------------
    /// The backend reply did not parse as a structured value after
    /// fence stripping. Carries a bounded preview of the offending text.
    #[error("the forensic engine returned an unreadable response format: {preview}")]
    MalformedResponse { preview: String },

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    /// A generation call completed without any usable output payload.
    #[error("no media returned by the generation model")]
    NoMediaReturned,

    /// The backend reported a long-running operation as failed.
    #[error("generation operation failed: {0}")]
    GenerationFailed(String),

    // -------------------------------------------------------------------------
    // System Errors
    // -------------------------------------------------------------------------
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for VeriscanError {
    fn from(err: reqwest::Error) -> Self {
        VeriscanError::BackendUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VeriscanError>;

// =============================================================================
// Helper Constructors
// =============================================================================

impl VeriscanError {
    /// Create a `MalformedResponse` from the raw backend text,
    /// truncating the preview to a displayable length.
    pub fn malformed(raw_text: &str) -> Self {
        let mut preview: String = raw_text.chars().take(PREVIEW_CHARS).collect();
        if raw_text.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        Self::MalformedResponse { preview }
    }

    /// Create a `BackendUnavailable` error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }

    /// Create a `Config` error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check whether this error originates in the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}
