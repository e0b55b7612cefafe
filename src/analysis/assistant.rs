//! Conversational Assistant Session
//!
//! Stateful multi-turn session with web grounding and a fixed forensic
//! persona. Conversational text has no fixed schema, so each turn's reply
//! is returned as-is with no extraction and no normalization. The session owns
//! its history and resends it in full every turn.

use tracing::debug;

use super::ForensicEngine;
use crate::gateway::{GatewayRequest, SharedGateway, TurnContent};
use crate::types::Result;

const PERSONA: &str = "You are a forensic media assistant. Use web search for news and facts. \
     Help users interpret deepfake scores and forensic data.";

/// One user's running conversation with the assistant.
pub struct AssistantSession {
    gateway: SharedGateway,
    model: String,
    history: Vec<TurnContent>,
}

impl ForensicEngine {
    /// Open a fresh assistant session sharing this engine's gateway.
    pub fn assistant_session(&self) -> AssistantSession {
        AssistantSession {
            gateway: self.gateway().clone(),
            model: self.models().assistant.clone(),
            history: Vec::new(),
        }
    }
}

impl AssistantSession {
    /// Send one user message and return the assistant's reply.
    pub async fn send(&mut self, message: &str) -> Result<String> {
        self.history.push(TurnContent::user_text(message));

        let request = GatewayRequest::new(&self.model)
            .with_history(self.history.clone())
            .with_grounding()
            .with_system_instruction(PERSONA);

        debug!(turns = self.history.len(), "Sending assistant turn");

        let reply = self.gateway.submit(request).await?;
        self.history.push(TurnContent::model_text(&reply.text));

        Ok(reply.text)
    }

    /// Number of turns (user and assistant) accumulated so far.
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }
}
