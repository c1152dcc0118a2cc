//! Operation state machine.

use crate::error::{Error, ErrorKind, Locale};
use crate::image::EncodedImage;

/// Why an operation failed, kept in session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Internal detail for logs; never shown to users.
    pub detail: String,
}

impl FailureReason {
    /// Creates a failure reason.
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Returns the localized message to show the user.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        self.kind.user_message(locale)
    }
}

impl From<&Error> for FailureReason {
    fn from(err: &Error) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Outcome of a finished operation: exactly one of image or failure.
pub type EditResult = std::result::Result<EncodedImage, FailureReason>;

/// Lifecycle of the current edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationState {
    /// Nothing attempted for the current inputs.
    #[default]
    Idle,
    /// A request is waiting on the model.
    InFlight,
    /// The last operation produced an image.
    Succeeded(EncodedImage),
    /// The last operation failed.
    Failed(FailureReason),
}

/// Inputs to [`OperationState::transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A validated request was sent.
    Submitted,
    /// The model call finished.
    Finished(EditResult),
    /// Submission was refused before reaching the model.
    Rejected(FailureReason),
    /// The primary or secondary image was replaced.
    InputsChanged,
}

impl OperationState {
    /// Returns the next state for `event`.
    ///
    /// An in-flight operation only leaves `InFlight` through `Finished`; every
    /// other event leaves it untouched. `Finished` outside `InFlight` is ignored.
    pub fn transition(self, event: SessionEvent) -> Self {
        match (self, event) {
            (Self::InFlight, SessionEvent::Finished(Ok(image))) => Self::Succeeded(image),
            (Self::InFlight, SessionEvent::Finished(Err(reason))) => Self::Failed(reason),
            (Self::InFlight, _) => Self::InFlight,
            (_, SessionEvent::Submitted) => Self::InFlight,
            (_, SessionEvent::Rejected(reason)) => Self::Failed(reason),
            (_, SessionEvent::InputsChanged) => Self::Idle,
            (state, SessionEvent::Finished(_)) => state,
        }
    }

    /// Returns true while a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Returns the result image, if the last operation succeeded.
    pub fn result(&self) -> Option<&EncodedImage> {
        match self {
            Self::Succeeded(image) => Some(image),
            _ => None,
        }
    }

    /// Returns the failure, if the last operation failed.
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
