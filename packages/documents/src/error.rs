use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Stored package data is malformed: {0}")]
    MalformedPackages(#[from] serde_json::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
