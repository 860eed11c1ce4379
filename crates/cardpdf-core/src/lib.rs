//! cardpdf core library
//!
//! This crate holds the document submission form: its slots and selections,
//! the precondition check, the request model handed to the HTTP client,
//! error types and client configuration.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod request;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{FormError, LogLevel, SubmitError};
pub use form::{FormRules, SubmissionForm};
pub use models::{DocumentType, ImageFile, ImageSlot, LayoutVariant};
pub use request::{FormPart, SubmissionRequest};
