use chrono::{DateTime, Utc};
use skz_catalog::{CompanyProfile, ServiceCatalog};
use skz_core::ProposalRecord;
use tracing::debug;

use crate::docx::DocxProjector;
use crate::error::DocumentResult;
use crate::format::DocumentFormat;
use crate::html::HtmlProjector;
use crate::layout::{self, DocumentLayout};
use crate::pdf::PdfProjector;

/// A backend that turns a layout into bytes of one format
pub trait DocumentProjector {
    fn format(&self) -> DocumentFormat;
    fn render(&self, layout: &DocumentLayout) -> DocumentResult<Vec<u8>>;
}

/// Bytes plus the headers a download response needs
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

pub fn projector_for(format: DocumentFormat) -> Box<dyn DocumentProjector + Send + Sync> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfProjector),
        DocumentFormat::Docx => Box::new(DocxProjector),
        DocumentFormat::Html => Box::new(HtmlProjector::default()),
    }
}

/// Builds the layout for a stored proposal and renders it in the requested format.
pub fn render_document(
    record: &ProposalRecord,
    catalog: &ServiceCatalog,
    company: &CompanyProfile,
    format: DocumentFormat,
    now: DateTime<Utc>,
) -> DocumentResult<RenderedDocument> {
    let layout = layout::build(record, catalog, company, now)?;
    let bytes = projector_for(format).render(&layout)?;

    debug!(
        proposal = %record.proposal_number,
        format = %format,
        size = bytes.len(),
        "Rendered proposal document"
    );

    Ok(RenderedDocument {
        bytes,
        file_name: format.file_name(&record.proposal_number),
        mime_type: format.mime_type(),
    })
}
