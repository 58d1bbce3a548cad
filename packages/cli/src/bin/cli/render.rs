use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use colored::*;
use skz_catalog::{CompanyProfile, ServiceCatalog};
use skz_documents::{render_document, DocumentFormat};

use skz_cli::{open_storage, Config};

#[derive(Args)]
pub struct RenderArgs {
    /// Proposal id
    pub id: String,
    /// pdf, docx or html
    #[arg(long, default_value = "pdf")]
    pub format: DocumentFormat,
    /// Output file; defaults to the download name in the current directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: RenderArgs, config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;
    let record = storage.get(&args.id).await?;

    let document = render_document(
        &record,
        &ServiceCatalog::standard(),
        &CompanyProfile::skyz(),
        args.format,
        Utc::now(),
    )?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&document.file_name));
    tokio::fs::write(&output, &document.bytes).await?;

    println!(
        "{} {} ({} bytes)",
        "✅ Wrote".green(),
        output.display(),
        document.bytes.len()
    );
    Ok(())
}
