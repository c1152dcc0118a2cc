//! Image payload types.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
    /// GIF format.
    Gif,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// An image held in its transport encoding: a MIME type plus base64 payload.
///
/// Renders to and parses from `data:<mime>;base64,<payload>` URLs. The payload
/// never carries the data-URL prefix, so it can be placed straight into an
/// outbound request part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Wraps an already base64-encoded payload without validating it.
    pub fn new(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64_data.into(),
        }
    }

    /// Encodes raw image bytes, detecting the MIME type from magic bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = ImageFormat::from_magic_bytes(bytes)
            .ok_or_else(|| Error::InvalidImage("unrecognized image format".into()))?;
        Ok(Self::from_bytes_with_mime(bytes, format.mime_type()))
    }

    /// Encodes raw bytes under an explicit MIME type.
    pub fn from_bytes_with_mime(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Reads an image file, detecting its type from content then extension.
    ///
    /// Files that are not recognizable images are rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let format = ImageFormat::from_magic_bytes(&bytes)
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(ImageFormat::from_extension)
            })
            .ok_or_else(|| {
                Error::InvalidImage(format!("{} is not a supported image", path.display()))
            })?;
        Ok(Self::from_bytes_with_mime(&bytes, format.mime_type()))
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    ///
    /// The MIME type must be an `image/*` type. The payload is normalized
    /// (whitespace stripped) and checked to be valid base64.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| Error::Decode("missing data: prefix".into()))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| Error::Decode("data URL is not base64-encoded".into()))?;
        if !mime_type.starts_with("image/") {
            return Err(Error::InvalidImage(format!(
                "unsupported MIME type: {mime_type}"
            )));
        }

        let cleaned: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        decode_base64_lenient(&cleaned).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: cleaned,
        })
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the base64 payload without any data-URL prefix.
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    /// Returns the image as a data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decodes the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_base64_lenient(&self.data).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Returns the format detected from the decoded bytes, if recognizable.
    pub fn detected_format(&self) -> Option<ImageFormat> {
        self.decode()
            .ok()
            .and_then(|bytes| ImageFormat::from_magic_bytes(&bytes))
    }

    /// Returns `path` unchanged if it has an extension, otherwise with the
    /// extension of the detected format (PNG when unrecognizable).
    pub fn path_with_extension(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.extension().is_some() {
            return path.to_path_buf();
        }
        path.with_extension(self.detected_format().unwrap_or_default().extension())
    }

    /// Decodes and writes the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = self.decode()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }
}

/// Decodes base64 that may be missing its `=` padding.
fn decode_base64_lenient(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    // Try standard decoding first (fast path)
    if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(input) {
        return Ok(data);
    }

    base64::engine::general_purpose::STANDARD_NO_PAD.decode(input)
}
