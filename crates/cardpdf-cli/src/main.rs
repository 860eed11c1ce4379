//! cardpdf CLI: submit document images to the PDF generation service.
//!
//! Set CARDPDF_API_URL (or API_URL) to point at the service; see
//! `ClientConfig::from_env` for the other variables.

use std::path::PathBuf;

use anyhow::Context;
use cardpdf_api_client::Submitter;
use cardpdf_cli::{apply_overrides, build_form, init_tracing, ConfigOverrides, FormInputs};
use cardpdf_core::{ClientConfig, DocumentType, ImageSlot, LayoutVariant};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cardpdf", about = "Smart PDF Generator client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload images and download the generated PDF
    Generate {
        /// Front image (required for submission)
        #[arg(long, value_name = "FILE")]
        front: Option<PathBuf>,
        /// Back image
        #[arg(long, value_name = "FILE")]
        back: Option<PathBuf>,
        /// Second front image
        #[arg(long, value_name = "FILE")]
        front2: Option<PathBuf>,
        /// Second back image
        #[arg(long, value_name = "FILE")]
        back2: Option<PathBuf>,
        /// Document type, e.g. PANCARD or "Driving License"
        #[arg(long)]
        document_type: Option<DocumentType>,
        /// Layout: normal, us or uk (repeat to request several at once)
        #[arg(long = "layout", required = true, value_name = "LAYOUT")]
        layouts: Vec<LayoutVariant>,
        /// Customer name printed on notary layouts
        #[arg(long)]
        customer_name: Option<String>,
        /// Text encoded in the QR code of notary layouts
        #[arg(long)]
        qr_text: Option<String>,
        /// Appointment date printed on notary layouts
        #[arg(long)]
        schedule_date: Option<String>,
        /// Extra pages for multi-page layouts (a PDF or several images)
        #[arg(long = "multi-page", value_name = "FILE")]
        multi_page: Vec<PathBuf>,
        /// Directory the PDF is saved to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Generation service URL
        #[arg(long)]
        api_url: Option<String>,
        /// Request timeout in seconds (0 = transport default)
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Refuse to submit without a document type
        #[arg(long)]
        require_document_type: bool,
    },
    /// List the document types the form offers
    DocumentTypes,
    /// List the layouts the service understands
    Layouts,
}

#[derive(Serialize)]
struct OptionEntry {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct GenerateResult {
    layout: LayoutVariant,
    path: PathBuf,
    size: usize,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            front,
            back,
            front2,
            back2,
            document_type,
            layouts,
            customer_name,
            qr_text,
            schedule_date,
            multi_page,
            output_dir,
            api_url,
            timeout_secs,
            require_document_type,
        } => {
            let config = ClientConfig::from_env().context("Invalid cardpdf configuration")?;
            let config = apply_overrides(
                config,
                ConfigOverrides {
                    api_url,
                    timeout_secs,
                    output_dir,
                    require_document_type,
                },
            )?;

            let form = build_form(&FormInputs {
                front,
                back,
                front2,
                back2,
                document_type,
                customer_name,
                qr_text,
                schedule_date,
                multi_page,
            })?;

            for slot in ImageSlot::ALL {
                if let Some(name) = form.preview(slot) {
                    tracing::info!(slot = %slot, file = name, "{}", slot.label());
                }
            }

            let submitter = Submitter::from_config(&config)?;

            // Submissions run concurrently and are not deduplicated.
            let outcomes = futures::future::join_all(
                layouts
                    .iter()
                    .map(|layout| submitter.submit(&form, *layout)),
            )
            .await;

            let mut failed = 0;
            for (layout, outcome) in layouts.iter().zip(outcomes) {
                match outcome {
                    Ok(download) => print_json(&GenerateResult {
                        layout: *layout,
                        path: download.path,
                        size: download.size,
                    })?,
                    Err(err) => {
                        failed += 1;
                        let prefix = if err.is_precondition() { "Warning" } else { "Error" };
                        eprintln!("{} ({}): {}", prefix, layout, err.user_message());
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} of {} submissions did not produce a PDF", failed, layouts.len());
            }
        }
        Commands::DocumentTypes => {
            let entries: Vec<OptionEntry> = DocumentType::ALL
                .iter()
                .map(|t| OptionEntry {
                    value: t.as_str(),
                    label: t.label(),
                })
                .collect();
            print_json(&entries)?;
        }
        Commands::Layouts => {
            let entries: Vec<OptionEntry> = LayoutVariant::ALL
                .iter()
                .map(|l| OptionEntry {
                    value: l.as_str(),
                    label: l.description(),
                })
                .collect();
            print_json(&entries)?;
        }
    }

    Ok(())
}
