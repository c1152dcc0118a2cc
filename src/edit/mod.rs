//! Edit request construction, prompting, and response extraction.

mod orchestrator;
mod prompt;
mod request;

pub use orchestrator::{extract_image, Orchestrator, RESULT_MIME_TYPE};
pub use prompt::{build_prompt, EditMode};
pub use request::EditRequest;
