//! Local handling of a generated document.
//!
//! A sink receives the response body and a suggested file name. The
//! directory sink writes into a temporary file first and persists it under
//! the final name, so a partial download never appears under that name and
//! the temporary file is removed on every error path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Upper bound on ` (n)` suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Store `body` under `file_name` (or a free variant of it) and return
    /// where it ended up.
    async fn deliver(&self, file_name: &str, body: Bytes) -> Result<PathBuf>;
}

/// Saves downloads into a directory without overwriting existing files.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, file_name: &str, body: Bytes) -> Result<PathBuf> {
        let dir = self.dir.clone();
        let file_name = file_name.to_string();

        tokio::task::spawn_blocking(move || persist_unique(&dir, &file_name, &body))
            .await
            .context("Download task panicked")?
    }
}

fn persist_unique(dir: &Path, file_name: &str, body: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".cardpdf-")
        .suffix(".part")
        .tempfile_in(dir)
        .context("Failed to create temporary download file")?;
    temp.write_all(body)
        .context("Failed to write download")?;
    temp.as_file()
        .sync_all()
        .context("Failed to flush download")?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let target = dir.join(candidate_name(file_name, attempt));
        match temp.persist_noclobber(&target) {
            Ok(_) => return Ok(target),
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                temp = err.file;
            }
            Err(err) => {
                return Err(err.error)
                    .with_context(|| format!("Failed to save {}", target.display()));
            }
        }
    }

    Err(anyhow::anyhow!(
        "No free file name for {} in {}",
        file_name,
        dir.display()
    ))
}

/// `card_document.pdf`, then `card_document (1).pdf`, `card_document (2).pdf`, ...
pub fn candidate_name(file_name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, attempt, ext),
        _ => format!("{} ({})", file_name, attempt),
    }
}
