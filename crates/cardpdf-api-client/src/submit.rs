//! Submission flow: validate, request, download.
//!
//! `idle -> validating -> aborted` when a precondition fails, otherwise
//! `requesting -> succeeded | failed`. The submitter holds no per-call
//! state; concurrent submissions are neither serialised nor cancelled.

use std::path::PathBuf;
use std::sync::Arc;

use cardpdf_core::{
    ClientConfig, FormRules, LayoutVariant, LogLevel, SubmissionForm, SubmitError,
};

use crate::download::{DirectorySink, DownloadSink};
use crate::ApiClient;

/// A stored download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    pub size: usize,
}

#[derive(Clone)]
pub struct Submitter {
    client: ApiClient,
    sink: Arc<dyn DownloadSink>,
    generate_path: String,
    download_name: String,
    rules: FormRules,
}

impl Submitter {
    pub fn new(client: ApiClient, sink: Arc<dyn DownloadSink>, config: &ClientConfig) -> Self {
        Self {
            client,
            sink,
            generate_path: config.generate_path.clone(),
            download_name: config.download_name.clone(),
            rules: config.rules(),
        }
    }

    /// Client and directory sink built from configuration.
    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(config)?;
        let sink = Arc::new(DirectorySink::new(config.output_dir.clone()));
        Ok(Self::new(client, sink, config))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Submit the form with one layout.
    ///
    /// A missing front image aborts before any network activity. Every
    /// other failure is collapsed into [`SubmitError::RequestFailed`]; the
    /// form is never modified.
    pub async fn submit(
        &self,
        form: &SubmissionForm,
        layout: LayoutVariant,
    ) -> Result<Download, SubmitError> {
        let result = self.run(form, layout).await;
        if let Err(err) = &result {
            report(err, layout);
        }
        result
    }

    async fn run(
        &self,
        form: &SubmissionForm,
        layout: LayoutVariant,
    ) -> Result<Download, SubmitError> {
        tracing::debug!(layout = %layout, "Validating submission");
        let request = form.prepare(layout, &self.rules)?;

        tracing::info!(
            layout = %layout,
            document_type = request.document_type.map(|t| t.as_str()).unwrap_or(""),
            fields = ?request.field_names(),
            payload_bytes = request.payload_size(),
            url = %self.client.build_url(&self.generate_path),
            "Requesting PDF generation"
        );

        let body = self
            .client
            .generate_pdf(&self.generate_path, &request)
            .await
            .map_err(SubmitError::RequestFailed)?;

        let size = body.len();
        let path = self
            .sink
            .deliver(&self.download_name, body)
            .await
            .map_err(SubmitError::RequestFailed)?;

        tracing::info!(layout = %layout, path = %path.display(), size, "PDF saved");
        Ok(Download { path, size })
    }
}

fn report(err: &SubmitError, layout: LayoutVariant) {
    match err.log_level() {
        LogLevel::Error => {
            tracing::error!(layout = %layout, error = ?err, "Error generating PDF");
        }
        LogLevel::Warn => {
            tracing::warn!(layout = %layout, error = %err, "Submission aborted");
        }
    }
}
