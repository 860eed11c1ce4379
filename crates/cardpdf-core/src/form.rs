//! Document submission form state
//!
//! The form holds four independent optional image slots, the document type
//! selection and a few optional notary fields. It is mutated only through
//! explicit selection calls and never stores anything derived from them.

use crate::error::FormError;
use crate::models::{DocumentType, ImageFile, ImageSlot, LayoutVariant};
use crate::request::SubmissionRequest;

/// Checks applied when a submission is prepared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormRules {
    /// Reject submissions without a document type instead of sending an
    /// empty `document_type` field.
    pub require_document_type: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    front1: Option<ImageFile>,
    back1: Option<ImageFile>,
    front2: Option<ImageFile>,
    back2: Option<ImageFile>,
    document_type: Option<DocumentType>,
    customer_name: Option<String>,
    qr_text: Option<String>,
    schedule_date: Option<String>,
    multi_page: Vec<ImageFile>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: ImageSlot) -> &mut Option<ImageFile> {
        match slot {
            ImageSlot::Front1 => &mut self.front1,
            ImageSlot::Back1 => &mut self.back1,
            ImageSlot::Front2 => &mut self.front2,
            ImageSlot::Back2 => &mut self.back2,
        }
    }

    /// Put a file in a slot, returning the file it replaced.
    pub fn select_image(&mut self, slot: ImageSlot, file: ImageFile) -> Option<ImageFile> {
        tracing::debug!(slot = %slot, file_name = file.file_name(), "Image selected");
        self.slot_mut(slot).replace(file)
    }

    pub fn clear_image(&mut self, slot: ImageSlot) -> Option<ImageFile> {
        self.slot_mut(slot).take()
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageFile> {
        match slot {
            ImageSlot::Front1 => self.front1.as_ref(),
            ImageSlot::Back1 => self.back1.as_ref(),
            ImageSlot::Front2 => self.front2.as_ref(),
            ImageSlot::Back2 => self.back2.as_ref(),
        }
    }

    /// File name shown next to the slot.
    pub fn preview(&self, slot: ImageSlot) -> Option<&str> {
        self.image(slot).map(ImageFile::file_name)
    }

    /// Previews of all populated slots, in slot order.
    pub fn previews(&self) -> Vec<(ImageSlot, &str)> {
        ImageSlot::ALL
            .iter()
            .filter_map(|slot| self.preview(*slot).map(|name| (*slot, name)))
            .collect()
    }

    pub fn select_document_type(&mut self, value: Option<DocumentType>) {
        self.document_type = value;
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    pub fn set_customer_name(&mut self, value: Option<String>) {
        self.customer_name = non_blank(value);
    }

    pub fn set_qr_text(&mut self, value: Option<String>) {
        self.qr_text = non_blank(value);
    }

    pub fn set_schedule_date(&mut self, value: Option<String>) {
        self.schedule_date = non_blank(value);
    }

    pub fn add_multi_page(&mut self, file: ImageFile) {
        self.multi_page.push(file);
    }

    pub fn multi_page(&self) -> &[ImageFile] {
        &self.multi_page
    }

    /// Check preconditions and snapshot the form for one submission.
    ///
    /// The form itself is left untouched whatever the outcome.
    pub fn prepare(
        &self,
        layout: LayoutVariant,
        rules: &FormRules,
    ) -> Result<SubmissionRequest, FormError> {
        if self.front1.is_none() {
            return Err(FormError::MissingFrontImage);
        }
        if rules.require_document_type && self.document_type.is_none() {
            return Err(FormError::MissingDocumentType);
        }

        let images = ImageSlot::ALL
            .iter()
            .filter_map(|slot| self.image(*slot).map(|file| (*slot, file.clone())))
            .collect();

        if layout.is_multi_page() && self.multi_page.is_empty() {
            tracing::warn!(
                layout = %layout,
                "Multi-page layout selected without multi_page_pdf attachments"
            );
        }

        Ok(SubmissionRequest {
            layout,
            document_type: self.document_type,
            images,
            customer_name: self.customer_name.clone(),
            qr_text: self.qr_text.clone(),
            schedule_date: self.schedule_date.clone(),
            multi_page: self.multi_page.clone(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
