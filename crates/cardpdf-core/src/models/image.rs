use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use crate::error::FormError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// One of the four independent image positions on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Front1,
    Back1,
    Front2,
    Back2,
}

impl ImageSlot {
    /// Slots in the order their parts appear in the request.
    pub const ALL: [ImageSlot; 4] = [
        ImageSlot::Front1,
        ImageSlot::Back1,
        ImageSlot::Front2,
        ImageSlot::Back2,
    ];

    /// Multipart field name for the slot.
    pub fn field_name(&self) -> &'static str {
        match self {
            ImageSlot::Front1 => "front_image",
            ImageSlot::Back1 => "back_image",
            ImageSlot::Front2 => "front_image2",
            ImageSlot::Back2 => "back_image2",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, ImageSlot::Front1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageSlot::Front1 => "Front Image (required)",
            ImageSlot::Back1 => "Back Image (optional)",
            ImageSlot::Front2 => "Front Image 2 (optional)",
            ImageSlot::Back2 => "Back Image 2 (optional)",
        }
    }
}

impl Display for ImageSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImageSlot::Front1 => write!(f, "front1"),
            ImageSlot::Back1 => write!(f, "back1"),
            ImageSlot::Front2 => write!(f, "front2"),
            ImageSlot::Back2 => write!(f, "back2"),
        }
    }
}

impl FromStr for ImageSlot {
    type Err = FormError;

    /// Accepts the slot identifier (`front1`) or its field name (`front_image`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "front1" | "front_image" => Ok(ImageSlot::Front1),
            "back1" | "back_image" => Ok(ImageSlot::Back1),
            "front2" | "front_image2" => Ok(ImageSlot::Front2),
            "back2" | "back_image2" => Ok(ImageSlot::Back2),
            _ => Err(FormError::InvalidSlot(s.to_string())),
        }
    }
}

/// A selected file: name, detected MIME type and contents.
///
/// Contents are reference-counted, so cloning a file into a request is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let content_type = detect_content_type(&bytes);
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk. Content is not checked; the generation
    /// service decides what it accepts.
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let bytes = std::fs::read(path).map_err(|source| FormError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.is_empty() {
            tracing::warn!(path = %path.display(), "Selected file is empty");
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());

        tracing::debug!(path = %path.display(), size = bytes.len(), "Loaded file");

        Ok(Self::new(file_name, bytes))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Detect MIME type from magic bytes.
pub fn detect_content_type(bytes: &[u8]) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_slot_field_names() {
        assert_eq!(ImageSlot::Front1.field_name(), "front_image");
        assert_eq!(ImageSlot::Back1.field_name(), "back_image");
        assert_eq!(ImageSlot::Front2.field_name(), "front_image2");
        assert_eq!(ImageSlot::Back2.field_name(), "back_image2");
    }

    #[test]
    fn test_slot_parse() {
        for slot in ImageSlot::ALL {
            assert_eq!(slot.to_string().parse::<ImageSlot>().unwrap(), slot);
            assert_eq!(slot.field_name().parse::<ImageSlot>().unwrap(), slot);
        }
        assert!("front3".parse::<ImageSlot>().is_err());
    }

    #[test]
    fn test_only_front1_is_required() {
        let required: Vec<_> = ImageSlot::ALL.iter().filter(|s| s.is_required()).collect();
        assert_eq!(required, vec![&ImageSlot::Front1]);
    }

    #[test]
    fn test_content_type_detection() {
        assert_eq!(detect_content_type(PNG_HEADER), "image/png");
        assert_eq!(detect_content_type(JPEG_HEADER), "image/jpeg");
        assert_eq!(detect_content_type(b"plain text"), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_front.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(JPEG_HEADER)
            .unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.file_name(), "id_front.jpg");
        assert_eq!(file.content_type(), "image/jpeg");
        assert_eq!(file.bytes().as_ref(), JPEG_HEADER);
    }

    #[test]
    fn test_from_path_loads_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        std::fs::File::create(&empty).unwrap();

        let file = ImageFile::from_path(&empty).unwrap();
        assert_eq!(file.file_name(), "empty.png");
        assert!(file.is_empty());
        assert_eq!(file.content_type(), "application/octet-stream");
    }

    #[cfg(unix)]
    #[test]
    fn test_from_path_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"scan_\xff.png"));
        std::fs::write(&path, PNG_HEADER).unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.file_name(), "scan_\u{FFFD}.png");
        assert_eq!(file.content_type(), "image/png");
    }

    #[test]
    fn test_from_path_rejects_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ImageFile::from_path(&dir.path().join("missing.png")),
            Err(FormError::UnreadableFile { .. })
        ));
    }
}
