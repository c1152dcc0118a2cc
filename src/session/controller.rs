//! Client state controller.

use crate::edit::{EditRequest, Orchestrator};
use crate::error::{Error, ErrorKind, Locale, Result};
use crate::image::EncodedImage;
use crate::model::GenerativeModel;
use crate::session::state::{EditResult, FailureReason, OperationState, SessionEvent};
use crate::session::timer::ProgressTimer;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct SessionInner {
    primary: Option<EncodedImage>,
    secondary: Option<EncodedImage>,
    instruction: String,
    state: OperationState,
    timer: Option<ProgressTimer>,
}

impl SessionInner {
    fn apply(&mut self, event: SessionEvent) {
        let prior = std::mem::take(&mut self.state);
        self.state = prior.transition(event);
    }

    fn validate(&self) -> Result<EditRequest> {
        let primary = self.primary.clone().ok_or(Error::MissingPrimaryImage)?;
        if self.instruction.trim().is_empty() {
            return Err(Error::EmptyInstruction);
        }
        Ok(EditRequest::new(
            primary,
            self.secondary.clone(),
            self.instruction.clone(),
        ))
    }

    fn finish(&mut self, result: EditResult) {
        if let Some(timer) = self.timer.take() {
            let elapsed_secs = timer.stop();
            tracing::debug!(elapsed_secs, ok = result.is_ok(), "edit finished");
        }
        self.apply(SessionEvent::Finished(result));
    }
}

/// Holds the inputs and lifecycle of one user's edit session.
///
/// All methods take `&self`; share the session through an `Arc` to read
/// state while a submission is pending. At most one operation is in flight:
/// a second [`submit`](Self::submit) is refused with
/// [`Error::AlreadyInProgress`].
pub struct EditSession<M> {
    orchestrator: Orchestrator<M>,
    inner: Mutex<SessionInner>,
}

impl<M: GenerativeModel> EditSession<M> {
    /// Creates an idle session that sends edits to `model`.
    pub fn new(model: M) -> Self {
        Self::with_orchestrator(Orchestrator::new(model))
    }

    /// Creates an idle session around an existing orchestrator.
    pub fn with_orchestrator(orchestrator: Orchestrator<M>) -> Self {
        Self {
            orchestrator,
            inner: Mutex::new(SessionInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the base image and clears any prior result or error.
    pub fn set_primary_image(&self, image: EncodedImage) {
        let mut inner = self.lock();
        inner.primary = Some(image);
        inner.apply(SessionEvent::InputsChanged);
    }

    /// Sets or clears the subject image and clears any prior result or error.
    pub fn set_secondary_image(&self, image: Option<EncodedImage>) {
        let mut inner = self.lock();
        inner.secondary = image;
        inner.apply(SessionEvent::InputsChanged);
    }

    /// Sets the free-text instruction.
    pub fn set_instruction(&self, instruction: impl Into<String>) {
        self.lock().instruction = instruction.into();
    }

    /// Returns the current base image.
    pub fn primary_image(&self) -> Option<EncodedImage> {
        self.lock().primary.clone()
    }

    /// Returns the current subject image.
    pub fn secondary_image(&self) -> Option<EncodedImage> {
        self.lock().secondary.clone()
    }

    /// Returns the current instruction text.
    pub fn instruction(&self) -> String {
        self.lock().instruction.clone()
    }

    /// Returns a snapshot of the operation state.
    pub fn state(&self) -> OperationState {
        self.lock().state.clone()
    }

    /// Seconds since the in-flight operation started; 0 when nothing is in flight.
    pub fn elapsed_secs(&self) -> u64 {
        self.lock()
            .timer
            .as_ref()
            .map(ProgressTimer::elapsed_secs)
            .unwrap_or(0)
    }

    /// Returns the localized message for the last failure, if any.
    pub fn error_message(&self, locale: Locale) -> Option<&'static str> {
        self.lock()
            .state
            .failure()
            .map(|reason| reason.user_message(locale))
    }

    /// Validates the inputs and runs one edit.
    ///
    /// Validation failures are recorded as `Failed` without calling the model.
    /// A call made while another edit is in flight returns
    /// [`Error::AlreadyInProgress`] and leaves the running edit untouched.
    pub async fn submit(&self) -> Result<EncodedImage> {
        // Check, validate and enter InFlight under one guard
        let (request, mut flight) = {
            let mut inner = self.lock();
            if inner.state.is_in_flight() {
                tracing::debug!("submit refused: edit already in flight");
                return Err(Error::AlreadyInProgress);
            }
            let request = match inner.validate() {
                Ok(request) => request,
                Err(err) => {
                    tracing::debug!(error = %err, "submit rejected");
                    inner.apply(SessionEvent::Rejected(FailureReason::from(&err)));
                    return Err(err);
                }
            };
            (request, Flight::begin(self, &mut inner))
        };

        let outcome = self.orchestrator.execute(&request).await;
        if let Err(ref err) = outcome {
            tracing::warn!(error = %err, "edit failed");
        }
        flight.complete(outcome.as_ref().cloned().map_err(FailureReason::from));
        outcome
    }
}

/// Marks the session in flight for the life of one model call.
///
/// If the submit future is dropped before the call returns, the operation is
/// recorded as failed so the timer is stopped and the session can resubmit.
struct Flight<'a, M> {
    session: &'a EditSession<M>,
    done: bool,
}

impl<'a, M: GenerativeModel> Flight<'a, M> {
    /// Enters `InFlight` through the caller's guard.
    fn begin(session: &'a EditSession<M>, inner: &mut SessionInner) -> Self {
        inner.apply(SessionEvent::Submitted);
        inner.timer = Some(ProgressTimer::start());
        Self {
            session,
            done: false,
        }
    }

    fn complete(&mut self, result: EditResult) {
        self.session.lock().finish(result);
        self.done = true;
    }
}

impl<M> Drop for Flight<'_, M> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut inner = self
            .session
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::warn!("edit abandoned before the model responded");
        inner.finish(Err(FailureReason::new(
            ErrorKind::Generation,
            "edit abandoned before completion",
        )));
    }
}
