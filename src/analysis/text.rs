//! Text Interrogation Orchestrators
//!
//! Two modes over the same pipeline: AI-detection judges whether the text
//! is machine written (no grounding), fact-check verifies its claims with
//! web grounding and attaches the collected citations.

use tracing::info;

use super::ForensicEngine;
use crate::citations;
use crate::extract::extract_record;
use crate::gateway::{GatewayRequest, TurnContent};
use crate::normalize::normalize_text;
use crate::types::{Result, TextAnalysisMode, TextAnalysisResult};

const AI_DETECT_INSTRUCTION: &str = "Detect AI-generated text. Return JSON with 'aiProbability', \
     'verdictLabel', 'aiSignals', 'humanSignals', 'summary'.";

const FACT_CHECK_INSTRUCTION: &str = "Verify claims using web search. Return JSON with 'claims' \
     array and 'summary'. Each claim has 'status', 'claim', 'sourceUrl', 'category'.";

impl ForensicEngine {
    /// Judge whether the text is AI-generated.
    pub async fn analyze_text(&self, text: &str) -> Result<TextAnalysisResult> {
        self.interrogate_text(text, TextAnalysisMode::AiDetect).await
    }

    /// Verify the text's claims against web sources.
    pub async fn fact_check(&self, text: &str) -> Result<TextAnalysisResult> {
        self.interrogate_text(text, TextAnalysisMode::FactCheck).await
    }

    async fn interrogate_text(
        &self,
        text: &str,
        mode: TextAnalysisMode,
    ) -> Result<TextAnalysisResult> {
        info!(mode = ?mode, "Starting text interrogation");

        let mut request = match mode {
            TextAnalysisMode::AiDetect => GatewayRequest::new(&self.models().text_detection)
                .with_system_instruction(AI_DETECT_INSTRUCTION),
            TextAnalysisMode::FactCheck => GatewayRequest::new(&self.models().fact_check)
                .with_system_instruction(FACT_CHECK_INSTRUCTION)
                .with_grounding(),
        };
        request = request.with_turn(TurnContent::user_text(text)).json_hint();

        let reply = self.gateway().submit(request).await?;
        let record = extract_record(&reply.text)?;

        let sources = match mode {
            TextAnalysisMode::FactCheck => citations::collect(&reply.candidates),
            TextAnalysisMode::AiDetect => Vec::new(),
        };

        Ok(normalize_text(&record, mode, sources))
    }
}
