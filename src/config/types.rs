//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/veriscan/) and project (.veriscan/) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{gateway, generation, models};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Backend gateway settings
    pub gateway: GatewayConfig,

    /// Model selectors per use case
    pub models: ModelConfig,

    /// Synthetic media generation settings
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            gateway: GatewayConfig::default(),
            models: ModelConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `VeriscanError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.gateway.timeout_secs == 0 {
            return Err(crate::types::VeriscanError::config(
                "gateway timeout_secs must be greater than 0",
            ));
        }

        if self.gateway.poll_interval_secs == 0 {
            return Err(crate::types::VeriscanError::config(
                "gateway poll_interval_secs must be greater than 0",
            ));
        }

        if self.generation.video_count == 0 {
            return Err(crate::types::VeriscanError::config(
                "generation video_count must be at least 1",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Gateway Configuration
// =============================================================================

/// Backend gateway connection settings.
///
/// The API key is never serialized to output and is redacted in debug
/// output; the gateway converts it to `SecretString` at construction.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// API base URL
    pub api_base: String,

    /// API key. Resolution falls back to the `GEMINI_API_KEY` environment
    /// variable when unset. Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Interval between long-running operation status checks, seconds
    pub poll_interval_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: gateway::DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout_secs: gateway::DEFAULT_TIMEOUT_SECS,
            poll_interval_secs: gateway::POLL_INTERVAL_SECS,
        }
    }
}

// =============================================================================
// Model Configuration
// =============================================================================

/// Model selector per analysis use case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub media_analysis: String,
    pub text_detection: String,
    pub fact_check: String,
    pub source_trace: String,
    pub transcription: String,
    pub certificate: String,
    pub assistant: String,
    pub image_generation: String,
    pub video_generation: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            media_analysis: models::MEDIA_ANALYSIS.to_string(),
            text_detection: models::TEXT_DETECTION.to_string(),
            fact_check: models::FACT_CHECK.to_string(),
            source_trace: models::SOURCE_TRACE.to_string(),
            transcription: models::TRANSCRIPTION.to_string(),
            certificate: models::CERTIFICATE.to_string(),
            assistant: models::ASSISTANT.to_string(),
            image_generation: models::IMAGE_GENERATION.to_string(),
            video_generation: models::VIDEO_GENERATION.to_string(),
        }
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

/// Synthetic media generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub image_aspect_ratio: String,
    pub video_aspect_ratio: String,
    pub video_resolution: String,
    pub video_count: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            image_aspect_ratio: generation::DEFAULT_ASPECT_RATIO.to_string(),
            video_aspect_ratio: generation::VIDEO_ASPECT_RATIO.to_string(),
            video_resolution: generation::VIDEO_RESOLUTION.to_string(),
            video_count: generation::VIDEO_COUNT,
        }
    }
}
