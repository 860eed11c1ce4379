//! Domain methods for the generation service.

use crate::ApiClient;
use anyhow::{Context, Result};
use bytes::Bytes;
use cardpdf_core::{FormPart, ImageFile, SubmissionRequest};
use reqwest::multipart::{Form, Part};

/// Translate a prepared submission into a multipart form, keeping field
/// order.
pub fn build_form(request: &SubmissionRequest) -> Result<Form> {
    let mut form = Form::new();
    for part in request.parts() {
        form = match part {
            FormPart::File { name, file } => form.part(name, file_part(file)?),
            FormPart::Text { name, value } => form.text(name, value.to_string()),
        };
    }
    Ok(form)
}

fn file_part(file: &ImageFile) -> Result<Part> {
    Part::bytes(file.bytes().to_vec())
        .file_name(file.file_name().to_string())
        .mime_str(file.content_type())
        .with_context(|| {
            format!(
                "Invalid content type '{}' for {}",
                file.content_type(),
                file.file_name()
            )
        })
}

impl ApiClient {
    /// Ask the service to render a PDF. Returns the PDF bytes.
    pub async fn generate_pdf(&self, path: &str, request: &SubmissionRequest) -> Result<Bytes> {
        let form = build_form(request)?;
        self.post_multipart_bytes(path, form).await
    }
}
