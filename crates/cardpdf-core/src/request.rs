//! Outbound request model
//!
//! A [`SubmissionRequest`] is a snapshot of the form taken once the
//! preconditions hold. [`SubmissionRequest::parts`] lists the multipart
//! fields in wire order; the HTTP client only translates them.

use crate::models::{DocumentType, ImageFile, ImageSlot, LayoutVariant};

pub const LAYOUT_FIELD: &str = "layout";
pub const DOCUMENT_TYPE_FIELD: &str = "document_type";
pub const CUSTOMER_NAME_FIELD: &str = "customer_name";
pub const QR_TEXT_FIELD: &str = "qr_text";
pub const SCHEDULE_DATE_FIELD: &str = "schedule_date";
pub const MULTI_PAGE_FIELD: &str = "multi_page_pdf";

/// One multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<'a> {
    File {
        name: &'static str,
        file: &'a ImageFile,
    },
    Text {
        name: &'static str,
        value: &'a str,
    },
}

impl FormPart<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::File { name, .. } | FormPart::Text { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub layout: LayoutVariant,
    pub document_type: Option<DocumentType>,
    /// Populated slots only, in slot order. Always starts with `Front1`.
    pub images: Vec<(ImageSlot, ImageFile)>,
    pub customer_name: Option<String>,
    pub qr_text: Option<String>,
    pub schedule_date: Option<String>,
    pub multi_page: Vec<ImageFile>,
}

impl SubmissionRequest {
    /// Multipart fields in wire order: image slots, `layout`,
    /// `document_type`, then the optional notary fields and attachments.
    pub fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts: Vec<FormPart<'_>> = self
            .images
            .iter()
            .map(|(slot, file)| FormPart::File {
                name: slot.field_name(),
                file,
            })
            .collect();

        parts.push(FormPart::Text {
            name: LAYOUT_FIELD,
            value: self.layout.as_str(),
        });
        parts.push(FormPart::Text {
            name: DOCUMENT_TYPE_FIELD,
            value: DocumentType::wire_value(self.document_type),
        });

        let optional_text = [
            (CUSTOMER_NAME_FIELD, &self.customer_name),
            (QR_TEXT_FIELD, &self.qr_text),
            (SCHEDULE_DATE_FIELD, &self.schedule_date),
        ];
        for (name, value) in optional_text {
            if let Some(value) = value {
                parts.push(FormPart::Text {
                    name,
                    value: value.as_str(),
                });
            }
        }

        parts.extend(self.multi_page.iter().map(|file| FormPart::File {
            name: MULTI_PAGE_FIELD,
            file,
        }));

        parts
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts().iter().map(FormPart::name).collect()
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageFile> {
        self.images
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, file)| file)
    }

    /// Total bytes of file content carried by the request.
    pub fn payload_size(&self) -> usize {
        self.images.iter().map(|(_, f)| f.len()).sum::<usize>()
            + self.multi_page.iter().map(ImageFile::len).sum::<usize>()
    }
}
