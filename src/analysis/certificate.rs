//! Certificate Generation Orchestrator
//!
//! Renders a previously normalized `AnalysisResult` into a formal report
//! text. Plain-text mode, no JSON extraction; an empty reply falls back to
//! a fixed non-empty line.

use tracing::info;

use super::ForensicEngine;
use crate::constants::defaults;
use crate::gateway::{GatewayRequest, TurnContent};
use crate::types::{AnalysisResult, Result, VeriscanError};

impl ForensicEngine {
    /// Generate a forensic certificate for a completed analysis.
    pub async fn generate_certificate(&self, result: &AnalysisResult) -> Result<String> {
        info!(analysis_id = %result.id, "Generating forensic certificate");

        let serialized = serde_json::to_string(result).map_err(|e| {
            VeriscanError::config(format!("failed to serialize analysis result: {}", e))
        })?;
        let prompt = format!(
            "Generate a formal forensic analysis certificate for this data: {}. Include file \
             name, verdict, probability scores, and detailed anomaly descriptions.",
            serialized
        );

        let request = GatewayRequest::new(&self.models().certificate)
            .with_turn(TurnContent::user_text(prompt));

        let reply = self.gateway().submit(request).await?;

        if reply.text.is_empty() {
            return Ok(defaults::CERTIFICATE_FALLBACK.to_string());
        }
        Ok(reply.text)
    }
}
