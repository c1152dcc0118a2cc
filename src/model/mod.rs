//! Remote generative model contract and providers.

#[cfg(test)]
pub(crate) mod mock;
mod provider;
pub mod providers;
mod types;

pub use provider::GenerativeModel;
pub use types::{
    Candidate, Content, ContentRequest, ContentResponse, GenerationConfig, InlineData, Part,
    PromptFeedback,
};
