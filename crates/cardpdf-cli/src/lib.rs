use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cardpdf_core::{ClientConfig, DocumentType, ImageFile, ImageSlot, SubmissionForm};

/// Paths and values collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct FormInputs {
    pub front: Option<PathBuf>,
    pub back: Option<PathBuf>,
    pub front2: Option<PathBuf>,
    pub back2: Option<PathBuf>,
    pub document_type: Option<DocumentType>,
    pub customer_name: Option<String>,
    pub qr_text: Option<String>,
    pub schedule_date: Option<String>,
    pub multi_page: Vec<PathBuf>,
}

impl FormInputs {
    fn slot_paths(&self) -> [(ImageSlot, Option<&PathBuf>); 4] {
        [
            (ImageSlot::Front1, self.front.as_ref()),
            (ImageSlot::Back1, self.back.as_ref()),
            (ImageSlot::Front2, self.front2.as_ref()),
            (ImageSlot::Back2, self.back2.as_ref()),
        ]
    }
}

/// Fill a form from command-line inputs. A missing front image is not an
/// error here; submission reports it.
pub fn build_form(inputs: &FormInputs) -> anyhow::Result<SubmissionForm> {
    let mut form = SubmissionForm::new();

    for (slot, path) in inputs.slot_paths() {
        if let Some(path) = path {
            let file = ImageFile::from_path(path)
                .with_context(|| format!("Cannot use {} for {}", path.display(), slot))?;
            form.select_image(slot, file);
        }
    }

    for path in &inputs.multi_page {
        let file = ImageFile::from_path(path)
            .with_context(|| format!("Cannot attach {}", path.display()))?;
        form.add_multi_page(file);
    }

    form.select_document_type(inputs.document_type);
    form.set_customer_name(inputs.customer_name.clone());
    form.set_qr_text(inputs.qr_text.clone());
    form.set_schedule_date(inputs.schedule_date.clone());

    Ok(form)
}

/// Command-line settings that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub require_document_type: bool,
}

pub fn apply_overrides(
    mut config: ClientConfig,
    overrides: ConfigOverrides,
) -> anyhow::Result<ClientConfig> {
    if let Some(api_url) = overrides.api_url {
        config.api_url = api_url;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(dir) = overrides.output_dir {
        config.output_dir = dir;
    }
    if overrides.require_document_type {
        config.require_document_type = true;
    }
    config.validate()?;
    Ok(config)
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpdf_core::{FormRules, LayoutVariant};

    fn write_file(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        path
    }

    #[test]
    fn build_form_fills_given_slots_only() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = FormInputs {
            front: Some(write_file(dir.path(), "id_front.jpg")),
            back2: Some(write_file(dir.path(), "id_back2.jpg")),
            document_type: Some(DocumentType::PanCard),
            ..FormInputs::default()
        };

        let form = build_form(&inputs).unwrap();
        assert_eq!(
            form.previews(),
            vec![
                (ImageSlot::Front1, "id_front.jpg"),
                (ImageSlot::Back2, "id_back2.jpg")
            ]
        );
        assert_eq!(form.document_type(), Some(DocumentType::PanCard));
    }

    #[test]
    fn build_form_without_front_defers_to_submission() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = FormInputs {
            back: Some(write_file(dir.path(), "back.jpg")),
            ..FormInputs::default()
        };

        let form = build_form(&inputs).unwrap();
        assert!(form
            .prepare(LayoutVariant::Normal, &FormRules::default())
            .is_err());
    }

    #[test]
    fn build_form_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = FormInputs {
            front: Some(dir.path().join("nope.jpg")),
            ..FormInputs::default()
        };

        let err = build_form(&inputs).unwrap_err();
        assert!(err.to_string().contains("nope.jpg"));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = apply_overrides(
            ClientConfig::default(),
            ConfigOverrides {
                api_url: Some("https://pdf.internal".to_string()),
                timeout_secs: Some(15),
                output_dir: Some(PathBuf::from("downloads")),
                require_document_type: true,
            },
        )
        .unwrap();

        assert_eq!(config.endpoint(), "https://pdf.internal/api/generate-pdf/");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.output_dir, PathBuf::from("downloads"));
        assert!(config.require_document_type);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let result = apply_overrides(
            ClientConfig::default(),
            ConfigOverrides {
                api_url: Some("ftp://pdf.internal".to_string()),
                ..ConfigOverrides::default()
            },
        );
        assert!(result.is_err());
    }
}
