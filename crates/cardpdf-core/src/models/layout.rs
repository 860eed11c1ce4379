use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::FormError;

/// PDF template the generation service should render.
///
/// `Normal`, `Us` and `Uk` are the three standard submission actions. The
/// remaining variants are notary and multi-page templates the service also
/// understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutVariant {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "us")]
    Us,
    #[serde(rename = "uk")]
    Uk,
    #[serde(rename = "ONENOTARY")]
    OneNotary,
    #[serde(rename = "UK88")]
    Uk88,
    #[serde(rename = "UK88_MULTIPAGE")]
    Uk88MultiPage,
    #[serde(rename = "us_multipage")]
    UsMultiPage,
    #[serde(rename = "non_multipage")]
    NonMultiPage,
}

impl LayoutVariant {
    /// The three actions offered by the form.
    pub const STANDARD: [LayoutVariant; 3] =
        [LayoutVariant::Normal, LayoutVariant::Us, LayoutVariant::Uk];

    pub const ALL: [LayoutVariant; 8] = [
        LayoutVariant::Normal,
        LayoutVariant::Us,
        LayoutVariant::Uk,
        LayoutVariant::OneNotary,
        LayoutVariant::Uk88,
        LayoutVariant::Uk88MultiPage,
        LayoutVariant::UsMultiPage,
        LayoutVariant::NonMultiPage,
    ];

    /// Value sent in the `layout` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutVariant::Normal => "normal",
            LayoutVariant::Us => "us",
            LayoutVariant::Uk => "uk",
            LayoutVariant::OneNotary => "ONENOTARY",
            LayoutVariant::Uk88 => "UK88",
            LayoutVariant::Uk88MultiPage => "UK88_MULTIPAGE",
            LayoutVariant::UsMultiPage => "us_multipage",
            LayoutVariant::NonMultiPage => "non_multipage",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LayoutVariant::Normal => "Generate Normal PDF",
            LayoutVariant::Us => "Generate US PDF",
            LayoutVariant::Uk => "Generate UK PDF",
            LayoutVariant::OneNotary => "Notary template with front/back images",
            LayoutVariant::Uk88 => "UK notary page with certification text and QR code",
            LayoutVariant::Uk88MultiPage => "UK notary page followed by attached pages",
            LayoutVariant::UsMultiPage => "US page followed by attached pages",
            LayoutVariant::NonMultiPage => "Attached pages only",
        }
    }

    /// Layouts that append the `multi_page_pdf` attachments.
    pub fn is_multi_page(&self) -> bool {
        matches!(
            self,
            LayoutVariant::Uk88MultiPage | LayoutVariant::UsMultiPage | LayoutVariant::NonMultiPage
        )
    }
}

impl Display for LayoutVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").to_lowercase().as_str() {
            "normal" => Ok(LayoutVariant::Normal),
            "us" => Ok(LayoutVariant::Us),
            "uk" => Ok(LayoutVariant::Uk),
            "onenotary" => Ok(LayoutVariant::OneNotary),
            "uk88" => Ok(LayoutVariant::Uk88),
            "uk88_multipage" => Ok(LayoutVariant::Uk88MultiPage),
            "us_multipage" => Ok(LayoutVariant::UsMultiPage),
            "non_multipage" => Ok(LayoutVariant::NonMultiPage),
            _ => Err(FormError::InvalidLayout(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_display() {
        assert_eq!(LayoutVariant::Normal.to_string(), "normal");
        assert_eq!(LayoutVariant::Us.to_string(), "us");
        assert_eq!(LayoutVariant::Uk.to_string(), "uk");
        assert_eq!(LayoutVariant::Uk88MultiPage.to_string(), "UK88_MULTIPAGE");
    }

    #[test]
    fn test_layout_parse_is_case_insensitive() {
        for layout in LayoutVariant::ALL {
            assert_eq!(layout.as_str().parse::<LayoutVariant>().unwrap(), layout);
        }
        assert_eq!("US".parse::<LayoutVariant>().unwrap(), LayoutVariant::Us);
        assert_eq!(
            "us-multipage".parse::<LayoutVariant>().unwrap(),
            LayoutVariant::UsMultiPage
        );
        assert_eq!("uk88".parse::<LayoutVariant>().unwrap(), LayoutVariant::Uk88);
    }

    #[test]
    fn test_layout_rejects_unknown() {
        assert!(matches!(
            "fr".parse::<LayoutVariant>(),
            Err(FormError::InvalidLayout(ref v)) if v == "fr"
        ));
    }

    #[test]
    fn test_standard_layouts_are_single_page() {
        for layout in LayoutVariant::STANDARD {
            assert!(!layout.is_multi_page());
        }
        assert!(LayoutVariant::NonMultiPage.is_multi_page());
        assert!(!LayoutVariant::Uk88.is_multi_page());
    }
}
