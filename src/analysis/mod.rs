//! Analysis Orchestrators
//!
//! One orchestrator per use case, each composing the same pipeline:
//! Gateway → Structured Extractor → (Citation Collector) → Normalizer,
//! with a use-case-specific model selector, prompt, and tool set.
//!
//! ## Modules
//!
//! - `media`: media forensic analysis → `AnalysisResult`
//! - `text`: text AI-detection and fact-check → `TextAnalysisResult`
//! - `trace`: reverse source lookup → `SourceTraceResult`
//! - `transcribe`: verbatim audio transcription
//! - `certificate`: forensic report text generation
//! - `assistant`: stateful grounded chat session
//! - `generate`: synthetic image and video generation

mod assistant;
mod certificate;
mod generate;
mod media;
mod text;
mod trace;
mod transcribe;

pub use assistant::AssistantSession;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, GenerationConfig, ModelConfig};
use crate::gateway::{GeminiGateway, SharedGateway};
use crate::types::Result;

/// Facade over the per-use-case orchestrators.
///
/// Holds the shared gateway plus the model selectors and generation
/// parameters from configuration. All state is immutable after
/// construction; concurrent calls share nothing else.
pub struct ForensicEngine {
    gateway: SharedGateway,
    models: ModelConfig,
    generation: GenerationConfig,
    poll_interval: Duration,
}

impl ForensicEngine {
    /// Build an engine around an existing gateway.
    pub fn new(gateway: SharedGateway, config: &Config) -> Self {
        Self {
            gateway,
            models: config.models.clone(),
            generation: config.generation.clone(),
            poll_interval: Duration::from_secs(config.gateway.poll_interval_secs),
        }
    }

    /// Build an engine with the production gateway, resolving the
    /// credential now. Fails with `MissingCredential` when none is
    /// configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let gateway = Arc::new(GeminiGateway::new(&config.gateway)?);
        Ok(Self::new(gateway, config))
    }

    pub(crate) fn gateway(&self) -> &SharedGateway {
        &self.gateway
    }

    pub(crate) fn models(&self) -> &ModelConfig {
        &self.models
    }

    pub(crate) fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
