//! Backend Gateway Abstraction
//!
//! Defines the `BackendGateway` trait, the engine's only I/O seam, plus
//! the backend-neutral request and reply types. The production
//! implementation is [`GeminiGateway`]; tests substitute scripted mocks.
//!
//! ## Modules
//!
//! - `gemini`: production gateway against a generateContent-style REST API
//! - `poll`: long-running operation state machine with an injected clock
//!
//! A gateway is constructed once per process with its resolved credential
//! and shared behind `Arc`; orchestrators never re-resolve configuration
//! per call. A transport failure propagates unchanged as
//! `BackendUnavailable`; the gateway never retries silently.

mod gemini;
mod poll;

pub use gemini::GeminiGateway;
pub use poll::{Clock, OperationPoller, PollState, TokioClock};

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{MediaPayload, Result};

/// Shared gateway handle for concurrent use across orchestrators.
pub type SharedGateway = Arc<dyn BackendGateway>;

// =============================================================================
// Request Types
// =============================================================================

/// Response-format hint passed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free-form text reply
    #[default]
    PlainText,
    /// Ask the backend to reply with a JSON document
    Json,
}

/// Tool capabilities enabled for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolCapability {
    #[default]
    None,
    /// Allow the backend to ground its answer in web search results
    WebGrounding,
}

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One content part within a turn: text or binary-with-mimetype
#[derive(Debug, Clone)]
pub enum PayloadPart {
    Text(String),
    Inline { mime_type: String, data: Vec<u8> },
}

impl PayloadPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn inline(payload: &MediaPayload) -> Self {
        Self::Inline {
            mime_type: payload.mime_type.clone(),
            data: payload.data.clone(),
        }
    }
}

/// An ordered group of parts attributed to one author
#[derive(Debug, Clone)]
pub struct TurnContent {
    pub role: Role,
    pub parts: Vec<PayloadPart>,
}

impl TurnContent {
    pub fn user(parts: Vec<PayloadPart>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![PayloadPart::text(text)])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![PayloadPart::text(text)],
        }
    }
}

/// A complete backend request: model selector, content turns, and options.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub model: String,
    pub turns: Vec<TurnContent>,
    pub format: ResponseFormat,
    pub tools: ToolCapability,
    pub system_instruction: Option<String>,
    /// Aspect-ratio hint for image generation requests
    pub aspect_ratio: Option<String>,
}

impl GatewayRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            turns: Vec::new(),
            format: ResponseFormat::default(),
            tools: ToolCapability::default(),
            system_instruction: None,
            aspect_ratio: None,
        }
    }

    /// Append one content turn
    pub fn with_turn(mut self, turn: TurnContent) -> Self {
        self.turns.push(turn);
        self
    }

    /// Replace all turns, e.g. with an assistant session's full history
    pub fn with_history(mut self, turns: Vec<TurnContent>) -> Self {
        self.turns = turns;
        self
    }

    /// Hint the backend to reply with a JSON document
    pub fn json_hint(mut self) -> Self {
        self.format = ResponseFormat::Json;
        self
    }

    /// Enable web grounding for this request
    pub fn with_grounding(mut self) -> Self {
        self.tools = ToolCapability::WebGrounding;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }
}

// =============================================================================
// Reply Types
// =============================================================================

/// One decoded part of a backend reply
#[derive(Debug, Clone)]
pub enum ReplyPart {
    Text(String),
    Inline { mime_type: String, data: Vec<u8> },
}

/// A web source cited by a grounding chunk
#[derive(Debug, Clone)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// One grounding chunk attached to a candidate; only chunks carrying a
/// web source contribute citations.
#[derive(Debug, Clone)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// One reply candidate with its parts and grounding metadata
#[derive(Debug, Clone, Default)]
pub struct ReplyCandidate {
    pub parts: Vec<ReplyPart>,
    pub grounding_chunks: Vec<GroundingChunk>,
}

impl ReplyCandidate {
    /// First inline (binary) part, if any
    pub fn first_inline(&self) -> Option<(&str, &[u8])> {
        self.parts.iter().find_map(|part| match part {
            ReplyPart::Inline { mime_type, data } => Some((mime_type.as_str(), data.as_slice())),
            ReplyPart::Text(_) => None,
        })
    }
}

/// Raw backend reply: the concatenated text of the primary candidate plus
/// every candidate's decoded parts and grounding metadata. Produced once
/// per call and consumed immediately; never mutated.
#[derive(Debug, Clone, Default)]
pub struct RawBackendReply {
    /// Concatenated text parts of the first candidate; empty when the
    /// reply carried no text
    pub text: String,
    pub candidates: Vec<ReplyCandidate>,
}

// =============================================================================
// Long-Running Operations
// =============================================================================

/// Parameters for a long-running video generation
#[derive(Debug, Clone)]
pub struct VideoGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub count: u32,
    pub resolution: String,
    pub aspect_ratio: String,
}

/// Opaque handle to a long-running backend operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle {
    pub name: String,
}

/// Output of a completed video generation operation
#[derive(Debug, Clone, Default)]
pub struct VideoOperationOutput {
    /// Fetchable resource URI; must be re-authenticated before retrieval
    pub download_uri: Option<String>,
}

/// Status of a long-running operation at one poll
#[derive(Debug, Clone)]
pub enum OperationStatus {
    Pending,
    Done(VideoOperationOutput),
    Failed(String),
}

// =============================================================================
// Backend Gateway Trait
// =============================================================================

/// The engine's boundary to the inference backend.
///
/// One `submit` call is one network round-trip; the gateway performs no
/// retries and keeps no per-call state.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Submit a request and return the raw reply
    async fn submit(&self, request: GatewayRequest) -> Result<RawBackendReply>;

    /// Start a long-running video generation operation
    async fn begin_video_generation(
        &self,
        request: VideoGenerationRequest,
    ) -> Result<OperationHandle>;

    /// Check the status of a long-running operation
    async fn check_operation(&self, handle: &OperationHandle) -> Result<OperationStatus>;

    /// Fetch a generated resource, re-authenticating with the gateway's
    /// credential
    async fn download(&self, uri: &str) -> Result<Vec<u8>>;
}
