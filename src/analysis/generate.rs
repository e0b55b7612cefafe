//! Synthetic Media Generation Orchestrators
//!
//! Image generation is a single round-trip returning inline data. Video
//! generation is long-running: begin the operation, poll at the configured
//! interval until the backend reports completion, then download the
//! resource with re-authentication.

use tracing::info;

use super::ForensicEngine;
use crate::gateway::{
    GatewayRequest, OperationPoller, PayloadPart, TurnContent, VideoGenerationRequest,
};
use crate::types::{GeneratedImage, Result, VeriscanError};

impl ForensicEngine {
    /// Generate a synthetic image from a prompt.
    ///
    /// `aspect_ratio` overrides the configured default when given.
    pub async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: Option<&str>,
    ) -> Result<GeneratedImage> {
        let ratio = aspect_ratio.unwrap_or(&self.generation().image_aspect_ratio);
        info!(aspect_ratio = %ratio, "Generating synthetic image");

        let request = GatewayRequest::new(&self.models().image_generation)
            .with_turn(TurnContent::user(vec![PayloadPart::text(prompt)]))
            .with_aspect_ratio(ratio);

        let reply = self.gateway().submit(request).await?;

        reply
            .candidates
            .iter()
            .find_map(|candidate| candidate.first_inline())
            .map(|(mime_type, data)| GeneratedImage {
                mime_type: mime_type.to_string(),
                data: data.to_vec(),
            })
            .ok_or(VeriscanError::NoMediaReturned)
    }

    /// Generate a synthetic video from a prompt and download the result.
    ///
    /// Blocks through the backend's polling cycle; there is no overall
    /// timeout, so callers needing bounded latency should wrap this future
    /// with their own cancellation.
    pub async fn generate_video(&self, prompt: &str) -> Result<Vec<u8>> {
        info!("Starting synthetic video generation");

        let generation = self.generation();
        let request = VideoGenerationRequest {
            model: self.models().video_generation.clone(),
            prompt: prompt.to_string(),
            count: generation.video_count,
            resolution: generation.video_resolution.clone(),
            aspect_ratio: generation.video_aspect_ratio.clone(),
        };

        let handle = self.gateway().begin_video_generation(request).await?;

        let poller = OperationPoller::new(self.poll_interval());
        let output = poller.wait(self.gateway().as_ref(), &handle).await?;

        let uri = output.download_uri.ok_or(VeriscanError::NoMediaReturned)?;
        self.gateway().download(&uri).await
    }
}
