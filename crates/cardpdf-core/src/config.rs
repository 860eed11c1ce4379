//! Configuration module
//!
//! Client settings: where the generation service lives, how long a request
//! may take, and where downloads are stored. Values come from the
//! environment (optionally a `.env` file); CLI flags override them.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::form::FormRules;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_GENERATE_PATH: &str = "/api/generate-pdf/";
pub const DEFAULT_DOWNLOAD_NAME: &str = "card_document.pdf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub generate_path: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub output_dir: PathBuf,
    pub download_name: String,
    pub require_document_type: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            timeout: None,
            output_dir: PathBuf::from("."),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            require_document_type: false,
        }
    }
}

impl ClientConfig {
    /// Load from CARDPDF_* variables (API_URL is accepted as a fallback for
    /// the service URL).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = match lookup("CARDPDF_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    anyhow::anyhow!("CARDPDF_TIMEOUT_SECS must be a whole number of seconds")
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let require_document_type = match lookup("CARDPDF_REQUIRE_DOCUMENT_TYPE") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!("CARDPDF_REQUIRE_DOCUMENT_TYPE must be true or false")
            })?,
            None => defaults.require_document_type,
        };

        let config = Self {
            api_url: lookup("CARDPDF_API_URL")
                .or_else(|| lookup("API_URL"))
                .unwrap_or(defaults.api_url),
            generate_path: lookup("CARDPDF_GENERATE_PATH").unwrap_or(defaults.generate_path),
            timeout,
            output_dir: lookup("CARDPDF_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            download_name: lookup("CARDPDF_DOWNLOAD_NAME").unwrap_or(defaults.download_name),
            require_document_type,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            ));
        }
        if !self.generate_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "Generate path must start with '/', got '{}'",
                self.generate_path
            ));
        }
        let name = self.download_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(anyhow::anyhow!(
                "Download name must be a plain file name, got '{}'",
                self.download_name
            ));
        }
        Ok(())
    }

    /// Full URL of the generation endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), self.generate_path)
    }

    pub fn rules(&self) -> FormRules {
        FormRules {
            require_document_type: self.require_document_type,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ClientConfig, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint(), "http://localhost:8000/api/generate-pdf/");
        assert_eq!(config.download_name, "card_document.pdf");
        assert!(config.timeout.is_none());
        assert!(!config.rules().require_document_type);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CARDPDF_API_URL", "https://pdf.example.com/"),
            ("CARDPDF_TIMEOUT_SECS", "30"),
            ("CARDPDF_OUTPUT_DIR", "/tmp/out"),
            ("CARDPDF_REQUIRE_DOCUMENT_TYPE", "yes"),
        ])
        .unwrap();

        assert_eq!(config.endpoint(), "https://pdf.example.com/api/generate-pdf/");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.rules().require_document_type);
    }

    #[test]
    fn api_url_fallback() {
        let config = config_from(&[("API_URL", "http://10.0.0.5:8000")]).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:8000");

        let config = config_from(&[
            ("API_URL", "http://10.0.0.5:8000"),
            ("CARDPDF_API_URL", "http://primary:8000"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://primary:8000");
    }

    #[test]
    fn zero_timeout_means_transport_default() {
        let config = config_from(&[("CARDPDF_TIMEOUT_SECS", "0")]).unwrap();
        assert!(config.timeout.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config_from(&[("CARDPDF_API_URL", "localhost:8000")]).is_err());
        assert!(config_from(&[("CARDPDF_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("CARDPDF_REQUIRE_DOCUMENT_TYPE", "maybe")]).is_err());
        assert!(config_from(&[("CARDPDF_DOWNLOAD_NAME", "../card.pdf")]).is_err());
        assert!(config_from(&[("CARDPDF_GENERATE_PATH", "api/generate-pdf/")]).is_err());
    }
}
