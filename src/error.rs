//! Error types for edit operations.

/// Errors that can occur while preparing or performing an edit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submit was called before a primary image was set.
    #[error("primary image is required")]
    MissingPrimaryImage,

    /// Submit was called with a blank instruction.
    #[error("instruction text is empty")]
    EmptyInstruction,

    /// Submit was called while another edit is still in flight.
    #[error("an edit is already in progress")]
    AlreadyInProgress,

    /// The model returned no candidates at all.
    #[error("model response contained no candidates")]
    NoCandidates,

    /// The first candidate carried no inline image data.
    #[error("no image part found in the first candidate")]
    NoImagePart,

    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is not a supported image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (reading an upload, saving a result).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], cheap to copy into session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No primary image was set.
    MissingPrimaryImage,
    /// The instruction was blank after trimming.
    EmptyInstruction,
    /// A previous edit has not finished yet.
    AlreadyInProgress,
    /// Transport, remote or local I/O failure.
    Generation,
    /// The response had no candidates.
    NoCandidates,
    /// The first candidate had no image part.
    NoImagePart,
}

/// Language used for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// English.
    #[default]
    English,
    /// Arabic.
    Arabic,
}

impl ErrorKind {
    /// Returns true for failures detected before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingPrimaryImage | Self::EmptyInstruction | Self::AlreadyInProgress
        )
    }

    /// Returns the message shown to the user for this kind of failure.
    ///
    /// Generation failures share one generic message so internal detail
    /// never reaches the user.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::MissingPrimaryImage, Locale::English) => "Please upload the primary image first.",
            (Self::MissingPrimaryImage, Locale::Arabic) => "من فضلك ارفع الصورة الأساسية أولاً",
            (Self::EmptyInstruction, Locale::English) => {
                "Tell us what you want to do with the image."
            }
            (Self::EmptyInstruction, Locale::Arabic) => "أخبرنا ماذا تريد أن تفعل في الصورة؟",
            (Self::AlreadyInProgress, Locale::English) => {
                "An edit is already in progress, please wait."
            }
            (Self::AlreadyInProgress, Locale::Arabic) => "جاري معالجة طلب سابق، انتظر قليلاً.",
            (Self::NoCandidates, Locale::English) => {
                "We could not process the images, please try again."
            }
            (Self::NoCandidates, Locale::Arabic) => "لم نتمكن من معالجة الصور، حاول مرة أخرى.",
            (Self::NoImagePart, Locale::English) => "Failed to receive the resulting image.",
            (Self::NoImagePart, Locale::Arabic) => "فشل في استلام الصورة الناتجة.",
            (Self::Generation, Locale::English) => "Something went wrong, let's try again!",
            (Self::Generation, Locale::Arabic) => "حدث خطأ بسيط، دعنا نحاول مرة أخرى!",
        }
    }
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPrimaryImage => ErrorKind::MissingPrimaryImage,
            Self::EmptyInstruction => ErrorKind::EmptyInstruction,
            Self::AlreadyInProgress => ErrorKind::AlreadyInProgress,
            Self::NoCandidates => ErrorKind::NoCandidates,
            Self::NoImagePart => ErrorKind::NoImagePart,
            Self::Auth(_)
            | Self::Api { .. }
            | Self::Network(_)
            | Self::Json(_)
            | Self::InvalidImage(_)
            | Self::Decode(_)
            | Self::Io(_) => ErrorKind::Generation,
        }
    }

    /// Returns true if this error was raised before reaching the network.
    pub fn is_local(&self) -> bool {
        self.kind().is_local()
    }

    /// Returns the localized user-facing message for this error.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        self.kind().user_message(locale)
    }
}

/// Result type alias for edit operations.
pub type Result<T> = std::result::Result<T, Error>;

const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Trims an API error body for storage in [`Error::Api`].
///
/// Truncates long bodies and masks anything that looks like a Google API key
/// (`AIza` followed by 35 key characters).
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_ERROR_MESSAGE_LEN));
    let mut rest = text.trim();
    while let Some(pos) = rest.find("AIza") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let key_len = tail
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(tail.len());
        out.push_str("[REDACTED]");
        rest = &tail[key_len..];
    }
    out.push_str(rest);

    if out.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = out.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        return format!("{truncated}...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::NoCandidates.kind(), ErrorKind::NoCandidates);
        assert_eq!(Error::NoImagePart.kind(), ErrorKind::NoImagePart);
        assert_eq!(
            Error::Api {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            ErrorKind::Generation
        );
        assert_eq!(Error::Auth("bad key".into()).kind(), ErrorKind::Generation);
    }

    #[test]
    fn test_is_local() {
        assert!(Error::MissingPrimaryImage.is_local());
        assert!(Error::EmptyInstruction.is_local());
        assert!(Error::AlreadyInProgress.is_local());

        assert!(!Error::NoCandidates.is_local());
        assert!(!Error::Decode("bad base64".into()).is_local());
    }

    #[test]
    fn test_generation_errors_share_generic_message() {
        let api = Error::Api {
            status: 503,
            message: "backend overloaded".into(),
        };
        let auth = Error::Auth("key rejected".into());
        assert_eq!(
            api.user_message(Locale::English),
            auth.user_message(Locale::English)
        );
        assert!(!api.user_message(Locale::English).contains("overloaded"));
    }

    #[test]
    fn test_validation_messages_are_distinct() {
        for locale in [Locale::English, Locale::Arabic] {
            assert_ne!(
                ErrorKind::MissingPrimaryImage.user_message(locale),
                ErrorKind::EmptyInstruction.user_message(locale)
            );
        }
        assert_eq!(
            ErrorKind::Generation.user_message(Locale::Arabic),
            "حدث خطأ بسيط، دعنا نحاول مرة أخرى!"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");
        assert_eq!(
            Error::NoImagePart.to_string(),
            "no image part found in the first candidate"
        );
    }

    #[test]
    fn test_sanitize_redacts_api_key() {
        let msg = "API key not valid: AIzaSyA1234567890abcdefghijklmnopqrstu. Please pass a valid key.";
        let clean = sanitize_error_message(msg);
        assert!(!clean.contains("AIzaSy"));
        assert!(clean.contains("[REDACTED]. Please pass a valid key."));
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let clean = sanitize_error_message(&body);
        assert_eq!(clean.chars().count(), MAX_ERROR_MESSAGE_LEN + 3);
        assert!(clean.ends_with("..."));
    }
}
