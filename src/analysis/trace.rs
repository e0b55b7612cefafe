//! Reverse Source Trace Orchestrator
//!
//! Asks the backend to locate the original source of an image using web
//! grounding, then normalizes the findings and attaches the grounding
//! citations.

use tracing::info;

use super::ForensicEngine;
use crate::citations;
use crate::extract::extract_record;
use crate::gateway::{GatewayRequest, PayloadPart, TurnContent};
use crate::normalize::normalize_trace;
use crate::types::{MediaPayload, Result, SourceTraceResult};

const TRACE_PROMPT: &str = "Find the original source of this image using web search. Return \
     JSON: {summary, originalEvent, manipulationDetected, confidence, findings: [{type, detail}]}";

impl ForensicEngine {
    /// Trace an image back to its original context.
    pub async fn trace_source(&self, image: MediaPayload) -> Result<SourceTraceResult> {
        info!("Starting reverse source trace");

        let request = GatewayRequest::new(&self.models().source_trace)
            .with_turn(TurnContent::user(vec![
                PayloadPart::inline(&image),
                PayloadPart::text(TRACE_PROMPT),
            ]))
            .json_hint()
            .with_grounding();

        let reply = self.gateway().submit(request).await?;
        let record = extract_record(&reply.text)?;
        let sources = citations::collect(&reply.candidates);

        Ok(normalize_trace(&record, sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{MockGateway, engine};
    use crate::gateway::{
        GroundingChunk, RawBackendReply, ReplyCandidate, ReplyPart, ToolCapability, WebSource,
    };

    fn payload() -> MediaPayload {
        MediaPayload::new(vec![0x89, 0x50], "image/png")
    }

    #[tokio::test]
    async fn test_trace_source_attaches_citations() {
        let text = r#"{"summary": "Press photo from 2019.", "originalEvent": "G7 Summit",
            "manipulationDetected": true, "confidence": 92,
            "findings": [{"type": "provenance", "detail": "Earliest crawl 2019-08-26"}]}"#;
        let reply = RawBackendReply {
            text: text.to_string(),
            candidates: vec![ReplyCandidate {
                parts: vec![ReplyPart::Text(text.to_string())],
                grounding_chunks: vec![GroundingChunk {
                    web: Some(WebSource {
                        uri: Some("https://archive.example/photo".to_string()),
                        title: Some("Archive".to_string()),
                    }),
                }],
            }],
        };
        let (engine, gateway) = engine(MockGateway::with_reply(reply));

        let result = engine.trace_source(payload()).await.unwrap();

        assert_eq!(result.original_event, "G7 Summit");
        assert!(result.manipulation_detected);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].url, "https://archive.example/photo");

        let sent = gateway.last_request();
        assert_eq!(sent.model, "gemini-3-pro-preview");
        assert_eq!(sent.tools, ToolCapability::WebGrounding);
    }

    #[tokio::test]
    async fn test_trace_without_grounding_chunks_is_total() {
        let (engine, _) = engine(MockGateway::with_text("{}"));

        let result = engine.trace_source(payload()).await.unwrap();
        assert_eq!(result.summary, "Source trace complete.");
        assert_eq!(result.original_event, "Unknown");
        assert!(result.sources.is_empty());
    }
}
