use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::FormError;

/// Category of identity document being submitted.
///
/// Serializes to the value the generation service expects in the
/// `document_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "PANCARD")]
    PanCard,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    #[serde(rename = "Residence Permit")]
    ResidencePermit,
    #[serde(rename = "Foreign Passport")]
    ForeignPassport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::PanCard,
        DocumentType::DrivingLicense,
        DocumentType::ResidencePermit,
        DocumentType::ForeignPassport,
    ];

    /// Value sent in the `document_type` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::PanCard => "PANCARD",
            DocumentType::DrivingLicense => "Driving License",
            DocumentType::ResidencePermit => "Residence Permit",
            DocumentType::ForeignPassport => "Foreign Passport",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::PanCard => "PAN CARD",
            DocumentType::DrivingLicense => "Driving License",
            DocumentType::ResidencePermit => "Residence Permit",
            DocumentType::ForeignPassport => "Foreign Passport",
        }
    }

    /// Wire value for an optional selection; unselected is the empty string.
    pub fn wire_value(selection: Option<DocumentType>) -> &'static str {
        selection.map(|t| t.as_str()).unwrap_or("")
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = FormError;

    /// Accepts the wire value, the label, or a dashed/underscored spelling
    /// (`driving-license`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "pancard" | "pan" => Ok(DocumentType::PanCard),
            "drivinglicense" | "drivinglicence" => Ok(DocumentType::DrivingLicense),
            "residencepermit" => Ok(DocumentType::ResidencePermit),
            "foreignpassport" | "passport" => Ok(DocumentType::ForeignPassport),
            _ => Err(FormError::InvalidDocumentType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_display() {
        assert_eq!(DocumentType::PanCard.to_string(), "PANCARD");
        assert_eq!(DocumentType::DrivingLicense.to_string(), "Driving License");
        assert_eq!(DocumentType::ResidencePermit.to_string(), "Residence Permit");
        assert_eq!(DocumentType::ForeignPassport.to_string(), "Foreign Passport");
    }

    #[test]
    fn test_document_type_parses_wire_values_and_labels() {
        for doc_type in DocumentType::ALL {
            assert_eq!(doc_type.as_str().parse::<DocumentType>().unwrap(), doc_type);
            assert_eq!(doc_type.label().parse::<DocumentType>().unwrap(), doc_type);
        }
        assert_eq!(
            "driving-license".parse::<DocumentType>().unwrap(),
            DocumentType::DrivingLicense
        );
        assert_eq!(
            "FOREIGN_PASSPORT".parse::<DocumentType>().unwrap(),
            DocumentType::ForeignPassport
        );
    }

    #[test]
    fn test_document_type_rejects_unknown() {
        let err = "Library Card".parse::<DocumentType>().unwrap_err();
        assert!(matches!(err, FormError::InvalidDocumentType(ref v) if v == "Library Card"));
        assert!("".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_unselected_wire_value_is_empty() {
        assert_eq!(DocumentType::wire_value(None), "");
        assert_eq!(
            DocumentType::wire_value(Some(DocumentType::PanCard)),
            "PANCARD"
        );
    }

    #[test]
    fn test_document_type_serde_uses_wire_value() {
        let json = serde_json::to_string(&DocumentType::ResidencePermit).unwrap();
        assert_eq!(json, "\"Residence Permit\"");
    }
}
