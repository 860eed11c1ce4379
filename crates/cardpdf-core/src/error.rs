//! Error types module
//!
//! Two outcomes can stop a submission: a precondition that is not met (found
//! locally, before any network activity) and a failed request (transport
//! error, non-success status or a download that could not be stored). Both
//! are carried by [`SubmitError`]. Input parsing and form checks report
//! [`FormError`].

use std::path::PathBuf;

/// Warning shown when the required front image is missing.
pub const MISSING_FRONT_IMAGE_MESSAGE: &str = "Please upload the front image.";

/// Generic message shown for every request failure.
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong while generating the PDF.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected, user-correctable problems
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Front image is required")]
    MissingFrontImage,

    #[error("Document type is required")]
    MissingDocumentType,

    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid image slot: {0}")]
    InvalidSlot(String),

    #[error("Failed to read file {path}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FormError {
    /// Message suitable for showing to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            FormError::MissingFrontImage => MISSING_FRONT_IMAGE_MESSAGE.to_string(),
            FormError::MissingDocumentType => "Please select a document type.".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Nothing was sent.
    #[error("Precondition failed: {0}")]
    Precondition(#[from] FormError),

    /// The request was attempted and failed. The cause is kept for
    /// diagnostics only; users always see the same generic message.
    #[error("PDF generation failed")]
    RequestFailed(#[source] anyhow::Error),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Precondition(err) => err.user_message(),
            SubmitError::RequestFailed(_) => REQUEST_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            SubmitError::Precondition(_) => LogLevel::Warn,
            SubmitError::RequestFailed(_) => LogLevel::Error,
        }
    }

    /// True when the error happened before any network activity.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SubmitError::Precondition(_))
    }
}
