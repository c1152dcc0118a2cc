//! Generative model trait.

use crate::error::Result;
use crate::model::types::{ContentRequest, ContentResponse};
use async_trait::async_trait;

/// A remote model that turns a multi-part request into candidate responses.
///
/// Implementations own the model identifier and credential; callers only see
/// the request/response contract.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends one request and returns the raw response.
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse>;

    /// Returns the model identifier used for every call.
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: GenerativeModel + ?Sized> GenerativeModel for std::sync::Arc<T> {
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
        (**self).generate_content(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
