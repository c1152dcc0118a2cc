//! Sends edit requests and extracts the result image.

use crate::edit::request::EditRequest;
use crate::error::{Error, Result};
use crate::image::EncodedImage;
use crate::model::{ContentResponse, GenerativeModel};
use std::time::Instant;

/// MIME type attached to every returned image.
pub const RESULT_MIME_TYPE: &str = "image/png";

/// Turns an edit request into one model call and one result image.
///
/// No retries and no timeout: a failure ends the operation.
#[derive(Debug, Clone)]
pub struct Orchestrator<M> {
    model: M,
}

impl<M: GenerativeModel> Orchestrator<M> {
    /// Creates an orchestrator around the given model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Returns the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Edits `primary` (or composes `secondary` into it) per `instruction`.
    pub async fn perform_edit(
        &self,
        primary: &EncodedImage,
        secondary: Option<&EncodedImage>,
        instruction: &str,
    ) -> Result<EncodedImage> {
        let request = EditRequest::new(primary.clone(), secondary.cloned(), instruction);
        self.execute(&request).await
    }

    /// Runs a prepared request.
    pub async fn execute(&self, request: &EditRequest) -> Result<EncodedImage> {
        let start = Instant::now();
        let wire = request.to_content_request();

        tracing::debug!(
            model = self.model.model_id(),
            mode = ?request.mode(),
            parts = wire.parts().len(),
            "submitting edit request"
        );

        let response = self.model.generate_content(&wire).await?;
        let image = extract_image(response)?;

        tracing::info!(
            model = self.model.model_id(),
            duration_ms = start.elapsed().as_millis() as u64,
            "edit complete"
        );

        Ok(image)
    }
}

/// Returns the first inline image of the first candidate.
///
/// Later candidates are never consulted.
pub fn extract_image(response: ContentResponse) -> Result<EncodedImage> {
    let ContentResponse {
        candidates,
        prompt_feedback,
    } = response;

    let Some(candidate) = candidates.into_iter().next() else {
        if let Some(feedback) = prompt_feedback {
            tracing::warn!(
                block_reason = feedback.block_reason.as_deref(),
                block_reason_message = feedback.block_reason_message.as_deref(),
                "prompt blocked by model"
            );
        }
        return Err(Error::NoCandidates);
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            tracing::warn!(finish_reason = reason, "candidate finished abnormally");
        }
    }

    candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .map(|inline| EncodedImage::new(RESULT_MIME_TYPE, inline.data))
        .ok_or(Error::NoImagePart)
}
