//! Analysis Request Types
//!
//! Caller-facing input types. A request is constructed once, handed to an
//! orchestrator by value, and discarded when the call completes. Nothing in
//! the engine retains it.

use serde::{Deserialize, Serialize};

/// Declared kind of the submitted media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Text,
}

impl MediaKind {
    /// Human-readable noun used when building analysis prompts
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio recording",
            Self::Text => "text document",
        }
    }
}

/// Opaque binary payload plus its declared MIME type.
///
/// Reading a file into bytes is the caller's responsibility; the engine
/// only transports the bytes to the backend.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl MediaPayload {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

/// Caller-supplied side metadata, passed through into the result unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Original file name
    pub name: String,
    /// Size in bytes as reported by the caller
    pub size_bytes: u64,
    /// Capture time, RFC 3339, when the caller knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}

impl FileMetadata {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            captured_at: None,
        }
    }

    pub fn with_captured_at(mut self, captured_at: impl Into<String>) -> Self {
        self.captured_at = Some(captured_at.into());
        self
    }
}

/// A complete media analysis request. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub payload: MediaPayload,
    pub kind: MediaKind,
    pub metadata: FileMetadata,
}

impl AnalysisRequest {
    pub fn new(payload: MediaPayload, kind: MediaKind, metadata: FileMetadata) -> Self {
        Self {
            payload,
            kind,
            metadata,
        }
    }
}
