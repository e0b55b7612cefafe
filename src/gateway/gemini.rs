//! Gemini REST Gateway
//!
//! Production `BackendGateway` against a generateContent-style REST API.
//! Handles credential resolution, wire encoding (binary parts travel as
//! base64 inline data), long-running video operations, and authenticated
//! resource download.
//!
//! The credential is resolved once at construction: absence, an empty
//! string, or the literal sentinel "undefined" fail fast with
//! `MissingCredential` before any network attempt.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use async_trait::async_trait;

use super::{
    BackendGateway, GatewayRequest, GroundingChunk, OperationHandle, OperationStatus, PayloadPart,
    RawBackendReply, ReplyCandidate, ReplyPart, ResponseFormat, Role, ToolCapability,
    VideoGenerationRequest, VideoOperationOutput, WebSource,
};
use crate::config::GatewayConfig;
use crate::constants::gateway as gateway_constants;
use crate::types::{Result, VeriscanError};

/// Gemini REST gateway with secure credential handling
pub struct GeminiGateway {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiGateway {
    /// Construct a gateway from configuration, resolving the credential
    /// immediately (explicit dependency injection: build once per process,
    /// share behind `Arc`).
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let api_key = resolve_credential(config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VeriscanError::backend(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VeriscanError::backend(format!(
                "backend error ({}): {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl BackendGateway for GeminiGateway {
    async fn submit(&self, request: GatewayRequest) -> Result<RawBackendReply> {
        info!("Submitting request to backend (model: {})", request.model);

        let url = format!("{}/models/{}:generateContent", self.api_base, request.model);
        let wire_request = build_wire_request(&request);

        debug!(
            turns = request.turns.len(),
            grounding = matches!(request.tools, ToolCapability::WebGrounding),
            "Sending generateContent request"
        );

        let response = self.post_json(&url, &wire_request).await?;

        let wire_reply: GenerateContentResponse = response.json().await.map_err(|e| {
            VeriscanError::backend(format!("Failed to decode backend response: {}", e))
        })?;

        map_reply(wire_reply)
    }

    async fn begin_video_generation(
        &self,
        request: VideoGenerationRequest,
    ) -> Result<OperationHandle> {
        info!(
            "Starting video generation (model: {})",
            request.model
        );

        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.api_base, request.model
        );
        let wire_request = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: request.prompt,
            }],
            parameters: VideoParameters {
                number_of_videos: request.count,
                resolution: request.resolution,
                aspect_ratio: request.aspect_ratio,
            },
        };

        let response = self.post_json(&url, &wire_request).await?;

        let operation: OperationWire = response.json().await.map_err(|e| {
            VeriscanError::backend(format!("Failed to decode operation response: {}", e))
        })?;

        Ok(OperationHandle {
            name: operation.name,
        })
    }

    async fn check_operation(&self, handle: &OperationHandle) -> Result<OperationStatus> {
        let url = format!("{}/{}", self.api_base, handle.name);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VeriscanError::backend(format!(
                "operation status error ({}): {}",
                status, body
            )));
        }

        let operation: OperationWire = response.json().await.map_err(|e| {
            VeriscanError::backend(format!("Failed to decode operation response: {}", e))
        })?;

        Ok(map_operation_status(operation))
    }

    async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        // The resource URI must carry the credential as a query parameter
        let mut url = url::Url::parse(uri)
            .map_err(|e| VeriscanError::backend(format!("invalid download URI: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());

        debug!("Downloading generated resource");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(VeriscanError::backend(format!(
                "download failed ({})",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// =============================================================================
// Credential Resolution
// =============================================================================

/// Resolve the credential: config slot first, then the environment slot.
fn resolve_credential(config: &GatewayConfig) -> Result<SecretString> {
    let candidate = config
        .api_key
        .clone()
        .or_else(|| std::env::var(gateway_constants::CREDENTIAL_ENV).ok());
    validate_credential(candidate)
}

/// Reject absent, empty, and sentinel credentials before any network use.
fn validate_credential(candidate: Option<String>) -> Result<SecretString> {
    match candidate {
        Some(key) if !key.is_empty() && key != gateway_constants::CREDENTIAL_SENTINEL => {
            Ok(SecretString::from(key))
        }
        _ => Err(VeriscanError::MissingCredential),
    }
}

// =============================================================================
// Wire Mapping
// =============================================================================

fn build_wire_request(request: &GatewayRequest) -> GenerateContentRequest {
    let contents = request.turns.iter().map(encode_turn).collect();

    let response_mime_type = match request.format {
        ResponseFormat::Json => Some("application/json".to_string()),
        ResponseFormat::PlainText => None,
    };

    let image_config = request.aspect_ratio.as_ref().map(|ratio| ImageConfigWire {
        aspect_ratio: ratio.clone(),
    });

    let generation_config = if response_mime_type.is_some() || image_config.is_some() {
        Some(GenerationConfigWire {
            response_mime_type,
            image_config,
        })
    } else {
        None
    };

    let tools = match request.tools {
        ToolCapability::WebGrounding => Some(vec![ToolWire {
            google_search: GoogleSearchWire {},
        }]),
        ToolCapability::None => None,
    };

    let system_instruction = request
        .system_instruction
        .as_ref()
        .map(|text| ContentWire {
            role: None,
            parts: vec![PartWire {
                text: Some(text.clone()),
                inline_data: None,
            }],
        });

    GenerateContentRequest {
        contents,
        generation_config,
        tools,
        system_instruction,
    }
}

fn encode_turn(turn: &super::TurnContent) -> ContentWire {
    let role = match turn.role {
        Role::User => "user",
        Role::Model => "model",
    };
    let parts = turn
        .parts
        .iter()
        .map(|part| match part {
            PayloadPart::Text(text) => PartWire {
                text: Some(text.clone()),
                inline_data: None,
            },
            PayloadPart::Inline { mime_type, data } => PartWire {
                text: None,
                inline_data: Some(InlineDataWire {
                    mime_type: mime_type.clone(),
                    data: BASE64.encode(data),
                }),
            },
        })
        .collect();

    ContentWire {
        role: Some(role.to_string()),
        parts,
    }
}

fn map_reply(wire: GenerateContentResponse) -> Result<RawBackendReply> {
    let mut candidates = Vec::new();

    for wire_candidate in wire.candidates.unwrap_or_default() {
        let mut parts = Vec::new();
        if let Some(content) = wire_candidate.content {
            for part in content.parts {
                if let Some(text) = part.text {
                    parts.push(ReplyPart::Text(text));
                } else if let Some(inline) = part.inline_data {
                    let data = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                        VeriscanError::backend(format!("failed to decode inline payload: {}", e))
                    })?;
                    parts.push(ReplyPart::Inline {
                        mime_type: inline.mime_type,
                        data,
                    });
                }
            }
        }

        let grounding_chunks = wire_candidate
            .grounding_metadata
            .and_then(|metadata| metadata.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| GroundingChunk {
                web: chunk.web.map(|web| WebSource {
                    uri: web.uri,
                    title: web.title,
                }),
            })
            .collect();

        candidates.push(ReplyCandidate {
            parts,
            grounding_chunks,
        });
    }

    // The reply's text is the concatenation of the primary candidate's
    // text parts, matching the backend SDK's accessor semantics
    let text = candidates
        .first()
        .map(|candidate| {
            candidate
                .parts
                .iter()
                .filter_map(|part| match part {
                    ReplyPart::Text(text) => Some(text.as_str()),
                    ReplyPart::Inline { .. } => None,
                })
                .collect::<String>()
        })
        .unwrap_or_default();

    if candidates.is_empty() {
        warn!("Backend reply carried no candidates");
    }

    Ok(RawBackendReply { text, candidates })
}

fn map_operation_status(operation: OperationWire) -> OperationStatus {
    if let Some(error) = operation.error {
        return OperationStatus::Failed(
            error.message.unwrap_or_else(|| "unknown error".to_string()),
        );
    }

    if !operation.done.unwrap_or(false) {
        return OperationStatus::Pending;
    }

    let download_uri = operation.response.and_then(|response| {
        response
            .generate_video_response
            .and_then(|video| video.samples())
            .and_then(|samples| {
                samples
                    .into_iter()
                    .find_map(|sample| sample.video.and_then(|v| v.uri))
            })
    });

    OperationStatus::Done(VideoOperationOutput { download_uri })
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<ContentWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfigWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentWire>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<PartWire>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineDataWire>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataWire {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfigWire>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfigWire {
    aspect_ratio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolWire {
    google_search: GoogleSearchWire,
}

#[derive(Debug, Serialize)]
struct GoogleSearchWire {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<CandidateWire>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateWire {
    content: Option<ContentWire>,
    grounding_metadata: Option<GroundingMetadataWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadataWire {
    grounding_chunks: Option<Vec<GroundingChunkWire>>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunkWire {
    web: Option<WebSourceWire>,
}

#[derive(Debug, Deserialize)]
struct WebSourceWire {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictLongRunningRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
struct VideoInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    number_of_videos: u32,
    resolution: String,
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct OperationWire {
    name: String,
    done: Option<bool>,
    error: Option<OperationErrorWire>,
    response: Option<OperationResponseWire>,
}

#[derive(Debug, Deserialize)]
struct OperationErrorWire {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponseWire {
    generate_video_response: Option<GenerateVideoResponseWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponseWire {
    generated_samples: Option<Vec<GeneratedSampleWire>>,
    // Older operation payloads use this field name instead
    generated_videos: Option<Vec<GeneratedSampleWire>>,
}

impl GenerateVideoResponseWire {
    fn samples(self) -> Option<Vec<GeneratedSampleWire>> {
        self.generated_samples.or(self.generated_videos)
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedSampleWire {
    video: Option<VideoRefWire>,
}

#[derive(Debug, Deserialize)]
struct VideoRefWire {
    uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::TurnContent;

    #[test]
    fn test_validate_credential_accepts_key() {
        assert!(validate_credential(Some("real-key".to_string())).is_ok());
    }

    #[test]
    fn test_validate_credential_rejects_absent() {
        assert!(matches!(
            validate_credential(None),
            Err(VeriscanError::MissingCredential)
        ));
    }

    #[test]
    fn test_validate_credential_rejects_empty() {
        assert!(matches!(
            validate_credential(Some(String::new())),
            Err(VeriscanError::MissingCredential)
        ));
    }

    #[test]
    fn test_validate_credential_rejects_sentinel() {
        assert!(matches!(
            validate_credential(Some("undefined".to_string())),
            Err(VeriscanError::MissingCredential)
        ));
    }

    #[test]
    fn test_wire_request_grounding_tool() {
        let request = GatewayRequest::new("m")
            .with_turn(TurnContent::user_text("check this"))
            .with_grounding();
        let wire = build_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json["tools"][0].get("googleSearch").is_some());
    }

    #[test]
    fn test_wire_request_json_hint() {
        let request = GatewayRequest::new("m")
            .with_turn(TurnContent::user_text("analyze"))
            .json_hint();
        let wire = build_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_wire_request_plain_text_omits_config() {
        let request = GatewayRequest::new("m").with_turn(TurnContent::user_text("transcribe"));
        let wire = build_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_wire_request_inline_data_is_base64() {
        let request = GatewayRequest::new("m").with_turn(TurnContent::user(vec![
            PayloadPart::Inline {
                mime_type: "image/png".to_string(),
                data: vec![0xDE, 0xAD],
            },
        ]));
        let wire = build_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();
        let inline = &json["contents"][0]["parts"][0]["inlineData"];
        assert_eq!(inline["mimeType"], "image/png");
        assert_eq!(inline["data"], BASE64.encode([0xDE, 0xAD]));
    }

    #[test]
    fn test_map_reply_concatenates_primary_text() {
        let wire: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "part one, "}, {"text": "part two"}]}
            }]
        }))
        .unwrap();
        let reply = map_reply(wire).unwrap();
        assert_eq!(reply.text, "part one, part two");
        assert_eq!(reply.candidates.len(), 1);
    }

    #[test]
    fn test_map_reply_decodes_inline_parts() {
        let wire: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": BASE64.encode([1u8, 2, 3])}}
                ]}
            }]
        }))
        .unwrap();
        let reply = map_reply(wire).unwrap();
        let (mime, data) = reply.candidates[0].first_inline().unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(data, &[1, 2, 3]);
        assert!(reply.text.is_empty());
    }

    #[test]
    fn test_map_reply_carries_grounding_chunks() {
        let wire: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "grounded"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://example.com", "title": "Example"}},
                    {"notWeb": {}}
                ]}
            }]
        }))
        .unwrap();
        let reply = map_reply(wire).unwrap();
        let chunks = &reply.candidates[0].grounding_chunks;
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].web.is_some());
        assert!(chunks[1].web.is_none());
    }

    #[test]
    fn test_map_reply_empty_candidates() {
        let wire: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let reply = map_reply(wire).unwrap();
        assert!(reply.text.is_empty());
        assert!(reply.candidates.is_empty());
    }

    #[test]
    fn test_operation_status_pending() {
        let operation: OperationWire =
            serde_json::from_value(serde_json::json!({"name": "operations/x", "done": false}))
                .unwrap();
        assert!(matches!(
            map_operation_status(operation),
            OperationStatus::Pending
        ));
    }

    #[test]
    fn test_operation_status_failed() {
        let operation: OperationWire = serde_json::from_value(serde_json::json!({
            "name": "operations/x",
            "done": true,
            "error": {"message": "quota exhausted"}
        }))
        .unwrap();
        match map_operation_status(operation) {
            OperationStatus::Failed(message) => assert_eq!(message, "quota exhausted"),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_operation_status_done_with_uri() {
        let operation: OperationWire = serde_json::from_value(serde_json::json!({
            "name": "operations/x",
            "done": true,
            "response": {"generateVideoResponse": {"generatedSamples": [
                {"video": {"uri": "https://dl.example/video"}}
            ]}}
        }))
        .unwrap();
        match map_operation_status(operation) {
            OperationStatus::Done(output) => {
                assert_eq!(output.download_uri.as_deref(), Some("https://dl.example/video"));
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_operation_status_done_legacy_field() {
        let operation: OperationWire = serde_json::from_value(serde_json::json!({
            "name": "operations/x",
            "done": true,
            "response": {"generateVideoResponse": {"generatedVideos": [
                {"video": {"uri": "https://dl.example/legacy"}}
            ]}}
        }))
        .unwrap();
        match map_operation_status(operation) {
            OperationStatus::Done(output) => {
                assert_eq!(
                    output.download_uri.as_deref(),
                    Some("https://dl.example/legacy")
                );
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }
}
