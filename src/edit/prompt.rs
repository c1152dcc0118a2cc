//! Task prompts sent alongside the images.

/// Which task the model is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Modify a single photo.
    Edit,
    /// Merge the subject of a second photo into the first.
    Compose,
}

impl EditMode {
    /// Selects the mode from whether a secondary image is present.
    pub fn for_inputs(has_secondary: bool) -> Self {
        if has_secondary {
            Self::Compose
        } else {
            Self::Edit
        }
    }
}

/// Builds the trailing text part for a request.
///
/// The instruction is embedded verbatim in both modes.
pub fn build_prompt(has_secondary: bool, instruction: &str) -> String {
    match EditMode::for_inputs(has_secondary) {
        EditMode::Compose => format!(
            "TASK: Image Composition & Merging.\n\
             - Image 1 is the background/base scene.\n\
             - Image 2 contains the person/object to be added.\n\
             - User Request: {instruction}\n\
             INSTRUCTIONS: Extract the subject from Image 2 and place them into Image 1 realistically.\n\
             Match lighting, perspective, and shadows. Maintain original facial features from Image 2."
        ),
        EditMode::Edit => format!(
            "TASK: Image Editing.\n\
             - Image 1: The photo to be edited.\n\
             - User Request: {instruction}\n\
             INSTRUCTIONS: Perform the requested edit naturally while maintaining the style and quality."
        ),
    }
}
