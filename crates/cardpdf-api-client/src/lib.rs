//! HTTP client for the PDF generation service.
//!
//! Provides a minimal client bound to one service host, the
//! `generate-pdf` call, the download sink that stores the returned file,
//! and [`Submitter`], which ties form, request and download together.
//! The CLI uses these directly.

pub mod api;
pub mod download;
pub mod submit;

use anyhow::{Context, Result};
use bytes::Bytes;
use cardpdf_core::ClientConfig;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the generation service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST multipart form and return the raw response body.
    ///
    /// Any non-success status is an error; its body is kept in the error
    /// message for diagnostics.
    pub async fn post_multipart_bytes(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Bytes> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .bytes()
            .await
            .context("Failed to read response body")
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub use download::{DirectorySink, DownloadSink};
pub use submit::{Download, Submitter};
