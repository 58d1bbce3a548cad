// ABOUTME: Document download endpoints and the shareable proposal viewer page
// ABOUTME: All three render from the same layout; the viewer also lets the client pick a package

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use skz_core::{ProposalRecord, ProposalStatus};
use skz_documents::{
    layout, render_document, DocumentError, DocumentFormat, DownloadLinks, HtmlProjector,
    PackageChoice, ViewerActions,
};
use tracing::info;

use crate::error::{ApiResult, AppError};
use crate::proposals_handlers::track_view;
use crate::state::AppState;

async fn download(state: &AppState, id: &str, format: DocumentFormat) -> ApiResult<Response> {
    let record = state.storage.get(id).await?;
    let document = render_document(&record, &state.catalog, &state.company, format, Utc::now())?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.file_name
    ))
    .map_err(AppError::internal)?;
    let length = document.bytes.len().to_string();

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(document.mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from_str(&length).map_err(AppError::internal)?),
        ],
        document.bytes,
    )
        .into_response())
}

pub async fn download_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    download(&state, &id, DocumentFormat::Pdf).await
}

pub async fn download_docx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    download(&state, &id, DocumentFormat::Docx).await
}

/// Server-rendered proposal page; opening it counts as a view
pub async fn proposal_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    track_view(&state, &id).await?;
    let record = state.storage.get(&id).await?;

    let now = Utc::now();
    let layout = layout::build(&record, &state.catalog, &state.company, now)?;
    let projector = HtmlProjector::with_downloads(DownloadLinks {
        pdf: state.document_url(&record.id, DocumentFormat::Pdf.extension()),
        docx: state.document_url(&record.id, DocumentFormat::Docx.extension()),
    })
    .with_actions(ViewerActions {
        select_url: format!("/proposta/{}/escolher", record.id),
        choices: package_choices(&record)?,
        selected: record.selected_package.clone(),
        expired: record.is_expired(now),
        whatsapp_url: state.company.whatsapp_url(),
    });

    Ok(Html(projector.render_page(&layout)))
}

/// Recommended package first, then combos, then alternatives
fn package_choices(record: &ProposalRecord) -> Result<Vec<PackageChoice>, DocumentError> {
    let packages = record.packages()?;
    Ok(std::iter::once(&packages.recommended)
        .chain(&packages.combos)
        .chain(&packages.alternatives)
        .map(|p| PackageChoice {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price.format_brl(),
        })
        .collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPackageForm {
    pub package_id: String,
}

/// Form target of the viewer: accepts the proposal with the chosen package
pub async fn select_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<SelectPackageForm>, FormRejection>,
) -> ApiResult<Redirect> {
    let Form(form) = form.map_err(|_| AppError::validation("Pacote inválido"))?;
    let record = state.storage.get(&id).await?;

    let now = Utc::now();
    if record.is_expired(now) {
        return Err(AppError::validation("Proposta expirada"));
    }
    let package_id = form.package_id.trim();
    if !package_choices(&record)?.iter().any(|c| c.id == package_id) {
        return Err(AppError::validation(format!(
            "Pacote não pertence a esta proposta: {}",
            package_id
        )));
    }

    state
        .storage
        .update_status(&id, ProposalStatus::Accepted, Some(package_id), now)
        .await?;
    info!(proposal_id = %id, package = %package_id, "Client picked a package");

    Ok(Redirect::to(&format!("/proposta/{}#escolher", record.id)))
}
