#![warn(missing_docs)]
//! Photoblend - natural-language photo editing and composition.
//!
//! Give it a base photo, optionally a second photo with a subject to merge in,
//! and a plain-language instruction; a Gemini image model returns the result.
//!
//! # Quick Start - Edit
//!
//! ```no_run
//! use photoblend::{EncodedImage, GeminiClient, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> photoblend::Result<()> {
//!     let orchestrator = Orchestrator::new(GeminiClient::builder().build()?);
//!     let scene = EncodedImage::from_path("beach.jpg")?;
//!     let result = orchestrator
//!         .perform_edit(&scene, None, "Turn the sky into a purple sunset")
//!         .await?;
//!     result.save("sunset.png")?;
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Session
//!
//! [`EditSession`] wraps the orchestrator with input validation, an explicit
//! operation state machine and an elapsed-seconds counter for progress display.
//!
//! ```no_run
//! use photoblend::{EditSession, EncodedImage, GeminiClient, Locale};
//!
//! #[tokio::main]
//! async fn main() -> photoblend::Result<()> {
//!     let session = EditSession::new(GeminiClient::builder().build()?);
//!     session.set_primary_image(EncodedImage::from_path("party.jpg")?);
//!     session.set_secondary_image(Some(EncodedImage::from_path("me.jpg")?));
//!     session.set_instruction("Add me next to the person on the left");
//!
//!     match session.submit().await {
//!         Ok(image) => println!("{}", image.to_data_url()),
//!         Err(e) => eprintln!("{}", e.user_message(Locale::English)),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli`: the `photoblend` command-line tool (default)

pub mod edit;
mod error;
pub mod image;
pub mod model;
pub mod session;

// Re-export error types at crate root
pub use error::{Error, ErrorKind, Locale, Result};

pub use edit::{build_prompt, EditMode, EditRequest, Orchestrator};
pub use image::{EncodedImage, ImageFormat};
pub use model::providers::{GeminiClient, GeminiClientBuilder, GeminiModel};
pub use model::{ContentRequest, ContentResponse, GenerativeModel};
pub use session::{EditSession, FailureReason, OperationState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::edit::{EditRequest, Orchestrator};
    pub use crate::error::{Error, Locale, Result};
    pub use crate::image::EncodedImage;
    pub use crate::model::providers::GeminiClient;
    pub use crate::model::GenerativeModel;
    pub use crate::session::{EditSession, OperationState};
}
