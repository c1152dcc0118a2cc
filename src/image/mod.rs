//! Image payloads in their transport encoding.

mod types;

pub use types::{EncodedImage, ImageFormat};
