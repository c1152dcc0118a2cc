//! Recording model double for tests.

use crate::error::{Error, Result};
use crate::model::provider::GenerativeModel;
use crate::model::types::{Candidate, ContentRequest, ContentResponse, Part};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Base64 of the 8-byte PNG signature.
pub(crate) const PNG_PAYLOAD: &str = "iVBORw0KGgo=";

enum Reply {
    Response(ContentResponse),
    ApiError(u16),
}

/// Returns a canned reply and records every request it receives.
pub(crate) struct MockModel {
    reply: Reply,
    requests: Mutex<Vec<ContentRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl MockModel {
    pub(crate) fn responding(response: ContentResponse) -> Self {
        Self {
            reply: Reply::Response(response),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Replies with one candidate whose first part is a PNG image.
    pub(crate) fn echoing_png() -> Self {
        Self::responding(ContentResponse {
            candidates: vec![Candidate::with_parts(vec![Part::inline_data(
                "image/png",
                PNG_PAYLOAD,
            )])],
            prompt_feedback: None,
        })
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self {
            reply: Reply::ApiError(status),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Holds every reply until the returned handle is notified.
    pub(crate) fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<ContentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::ApiError(status) => Err(Error::Api {
                status: *status,
                message: "mock failure".into(),
            }),
        }
    }

    fn model_id(&self) -> &str {
        "mock-image-model"
    }
}
