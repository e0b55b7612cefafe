//! Media Forensic Analysis Orchestrator
//!
//! Submits media bytes for forensic judgment and normalizes the reply into
//! a total `AnalysisResult`. No grounding: the verdict rests on the
//! backend's own analysis, not on web search.

use tracing::info;

use super::ForensicEngine;
use crate::extract::extract_record;
use crate::gateway::{GatewayRequest, PayloadPart, TurnContent};
use crate::normalize::normalize_media;
use crate::types::{AnalysisRequest, AnalysisResult, MediaKind, Result};

fn analysis_prompt(kind: MediaKind) -> String {
    format!(
        "Forensic analysis of this {}: Output JSON with verdict (REAL/LIKELY_FAKE), \
         deepfakeProbability (0-100), confidence (0-100), summary, userRecommendation, \
         manipulationType, guidance, analysisSteps (object with integrity, consistency, \
         aiPatterns, temporal, each {{score 0-100, explanation, confidenceQualifier}}), \
         and explanations (array: {{point, detail, category, timestamp}}).",
        kind.noun()
    )
}

impl ForensicEngine {
    /// Run the full media pipeline: submit → extract → normalize.
    pub async fn analyze_media(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        info!(
            file = %request.metadata.name,
            kind = ?request.kind,
            "Starting media forensic analysis"
        );

        let gateway_request = GatewayRequest::new(&self.models().media_analysis)
            .with_turn(TurnContent::user(vec![
                PayloadPart::inline(&request.payload),
                PayloadPart::text(analysis_prompt(request.kind)),
            ]))
            .json_hint();

        let reply = self.gateway().submit(gateway_request).await?;
        let record = extract_record(&reply.text)?;

        Ok(normalize_media(&record, request.metadata))
    }
}
