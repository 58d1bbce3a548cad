// ABOUTME: Projects a stored proposal into PDF, DOCX, and HTML documents
// ABOUTME: One typed layout description drives every backend

pub mod docx;
pub mod error;
pub mod format;
pub mod html;
pub mod layout;
pub mod pdf;
pub mod projector;

pub use error::DocumentError;
pub use format::DocumentFormat;
pub use layout::{Block, DocumentLayout, Footer};
pub use docx::DocxProjector;
pub use html::{html_escape, DownloadLinks, HtmlProjector, PackageChoice, ViewerActions};
pub use pdf::PdfProjector;
pub use projector::{projector_for, render_document, DocumentProjector, RenderedDocument};
