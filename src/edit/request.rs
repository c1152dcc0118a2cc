//! Immutable edit request.

use crate::edit::prompt::{build_prompt, EditMode};
use crate::image::EncodedImage;
use crate::model::{ContentRequest, Part};

/// One edit: a primary image, an optional subject image, and an instruction.
///
/// Built fresh for each submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    primary: EncodedImage,
    secondary: Option<EncodedImage>,
    instruction: String,
}

impl EditRequest {
    /// Creates a request.
    pub fn new(
        primary: EncodedImage,
        secondary: Option<EncodedImage>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            secondary,
            instruction: instruction.into(),
        }
    }

    /// Returns the base image.
    pub fn primary(&self) -> &EncodedImage {
        &self.primary
    }

    /// Returns the subject image, if any.
    pub fn secondary(&self) -> Option<&EncodedImage> {
        self.secondary.as_ref()
    }

    /// Returns the raw user instruction.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the task mode implied by the inputs.
    pub fn mode(&self) -> EditMode {
        EditMode::for_inputs(self.secondary.is_some())
    }

    /// Builds the wire request: `[primary, secondary?, prompt]`.
    pub fn to_content_request(&self) -> ContentRequest {
        let mut parts = Vec::with_capacity(3);

        parts.push(Part::inline_data(
            self.primary.mime_type(),
            self.primary.base64_data(),
        ));

        if let Some(ref secondary) = self.secondary {
            parts.push(Part::inline_data(
                secondary.mime_type(),
                secondary.base64_data(),
            ));
        }

        // Prompt always goes last
        parts.push(Part::text(build_prompt(
            self.secondary.is_some(),
            &self.instruction,
        )));

        ContentRequest::from_parts(parts)
    }
}
