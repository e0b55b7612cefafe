//! Veriscan - Verdict Engine for AI-Assisted Media Forensics
//!
//! A typed boundary layer over a hosted multimodal inference backend. The
//! backend judges whether media is authentic; this crate makes that
//! judgment **reliable, typed, and total**: it submits requests, extracts
//! a structured record from the free-text reply despite inconsistent
//! formatting, applies a deterministic verdict policy, and guarantees a
//! schema-complete result even under partial or malformed backend output.
//!
//! ## Core Components
//!
//! - **Backend Gateway**: single I/O seam with fail-fast credential
//!   resolution; no silent retries
//! - **Structured Extractor**: fence-stripping JSON extraction; unparsable
//!   replies are hard errors, never silently defaulted
//! - **Citation Collector**: ordered web-source citations from grounding
//!   metadata
//! - **Result Normalizer / Verdict Policy**: default substitution plus the
//!   four-branch REAL / LIKELY_FAKE decision rule
//! - **Analysis Orchestrators**: media forensics, text AI-detection,
//!   fact-check, source trace, transcription, certificates, assistant
//!   chat, and synthetic media generation
//!
//! ## Quick Start
//!
//! ```ignore
//! use veriscan::{AnalysisRequest, ConfigLoader, FileMetadata, ForensicEngine,
//!     MediaKind, MediaPayload};
//!
//! let config = ConfigLoader::load()?;
//! let engine = ForensicEngine::from_config(&config)?;
//!
//! let request = AnalysisRequest::new(
//!     MediaPayload::new(bytes, "image/jpeg"),
//!     MediaKind::Image,
//!     FileMetadata::new("suspect.jpg", 2048),
//! );
//! let result = engine.analyze_media(request).await?;
//! println!("{:?} ({}%)", result.verdict, result.deepfake_probability);
//! ```

pub mod analysis;
pub mod citations;
pub mod config;
pub mod constants;
pub mod extract;
pub mod gateway;
pub mod logging;
pub mod normalize;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, GatewayConfig, GenerationConfig, ModelConfig};

// Error Types
pub use types::error::{Result, VeriscanError};

// Request & Result Types
pub use types::{
    AnalysisRequest, AnalysisResult, Citation, Claim, ConfidenceLevel, FileMetadata,
    GeneratedImage, MediaKind, MediaPayload, SourceTraceResult, TextAnalysisMode,
    TextAnalysisResult, Verdict,
};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use analysis::{AssistantSession, ForensicEngine};

pub use gateway::{BackendGateway, GatewayRequest, GeminiGateway, RawBackendReply, SharedGateway};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use citations::collect as collect_citations;
pub use extract::{ExtractedRecord, extract_record};
pub use normalize::{
    bucket_confidence, decide_verdict, normalize_media, normalize_text, normalize_trace,
};
