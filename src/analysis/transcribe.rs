//! Transcription Orchestrator
//!
//! Plain-text mode: the reply is returned verbatim, including the empty
//! string. No extraction and no default substitution: any non-empty
//! transcription is by definition backend-authored.

use tracing::info;

use super::ForensicEngine;
use crate::gateway::{GatewayRequest, PayloadPart, TurnContent};
use crate::types::{MediaPayload, Result};

const TRANSCRIBE_PROMPT: &str = "Transcribe the audio exactly. Output the text only.";

impl ForensicEngine {
    /// Transcribe an audio payload verbatim.
    pub async fn transcribe(&self, audio: MediaPayload) -> Result<String> {
        info!(mime_type = %audio.mime_type, "Starting transcription");

        let request =
            GatewayRequest::new(&self.models().transcription).with_turn(TurnContent::user(vec![
                PayloadPart::inline(&audio),
                PayloadPart::text(TRANSCRIBE_PROMPT),
            ]));

        let reply = self.gateway().submit(request).await?;
        Ok(reply.text)
    }
}
