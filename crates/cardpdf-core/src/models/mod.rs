//! Data models for the submission form
//!
//! Closed enumerations for the selections the form offers, plus the file
//! held by an image slot.

mod document_type;
mod image;
mod layout;

pub use document_type::*;
pub use image::*;
pub use layout::*;
