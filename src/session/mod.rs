//! Client session: inputs, validation, and operation lifecycle.

mod controller;
mod state;
mod timer;

pub use controller::EditSession;
pub use state::{EditResult, FailureReason, OperationState, SessionEvent};
pub use timer::ProgressTimer;
