// ABOUTME: HTTP request handlers for the proposal lifecycle
// ABOUTME: Create, read with view tracking, status patch, and the manual email resend

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skz_core::{Category, PackageRecommendation, ProposalRecord, ProposalStatus, Timeline};
use skz_documents::DocumentError;
use skz_recommend::RecommendationEngine;
use tracing::{info, warn};

use crate::auth::AdminSession;
use crate::error::{ApiResult, AppError};
use crate::intake::{CreateProposalRequest, IntakeFormVersion};
use crate::notifications::{deliver_proposal_email, spawn_first_view_notice, spawn_proposal_email};
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        info!(error = %rejection, "Rejected request body");
        AppError::validation("Corpo da requisição inválido")
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProposal {
    pub proposal_id: String,
    pub proposal_number: String,
    pub proposal_url: String,
    /// Echo of the email preference (absent counts as yes), not a delivery report
    pub email_sent: bool,
}

/// Validate the intake, run the engine, persist and queue the client email
pub async fn create_proposal(
    State(state): State<AppState>,
    body: Result<Json<CreateProposalRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<CreatedProposal>> {
    let request = json_body(body)?;
    let form = IntakeFormVersion::Optimized;
    let intake = form.validate(&request, &state.catalog).map_err(|errors| {
        let step = form.first_failing_step(&errors);
        AppError::invalid_fields(errors, step)
    })?;

    let recommendation = RecommendationEngine::new(&state.catalog).recommend(&intake.recommendation_input())?;
    // Only an explicit opt-in sends; the stored preference still defaults to yes
    let send_now = request.send_proposal_by_email == Some(true);
    let record = state
        .storage
        .create(&intake.into_new_proposal(recommendation))
        .await?;

    info!(
        proposal_id = %record.id,
        proposal_number = %record.proposal_number,
        service = %record.main_service,
        "Proposal created"
    );

    let created = CreatedProposal {
        proposal_id: record.id.clone(),
        proposal_number: record.proposal_number.clone(),
        proposal_url: state.proposal_url(&record.id),
        email_sent: record.send_by_email,
    };

    if send_now {
        spawn_proposal_email(state, record);
    }

    Ok(ok(created))
}

/// Stored proposal with its package slots parsed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: String,
    pub proposal_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_segment: Option<String>,
    pub category: Category,
    pub main_service: String,
    pub main_service_name: String,
    pub service_option: Option<String>,
    pub challenges: Vec<String>,
    pub timeline: Timeline,
    pub budget: Option<String>,
    pub has_branding: Option<String>,
    pub delivery_method: Vec<String>,
    pub wants_meeting: bool,
    pub observations: Option<String>,
    pub recommended_package: PackageRecommendation,
    pub alternative_packages: Vec<PackageRecommendation>,
    pub combos: Vec<PackageRecommendation>,
    pub selected_package: Option<String>,
    pub status: ProposalStatus,
    pub view_count: i64,
    pub is_expired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub email_sent_at: Option<DateTime<Utc>>,
}

impl ProposalView {
    pub fn from_record(
        record: ProposalRecord,
        service_name: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DocumentError> {
        let packages = record.packages()?;
        let is_expired = record.is_expired(now);

        Ok(ProposalView {
            id: record.id,
            proposal_number: record.proposal_number,
            client_name: record.client_name,
            client_email: record.client_email,
            client_phone: record.client_phone,
            client_company: record.client_company,
            client_segment: record.client_segment,
            category: record.category,
            main_service: record.main_service,
            main_service_name: service_name,
            service_option: record.service_option,
            challenges: record.challenges,
            timeline: record.timeline,
            budget: record.budget,
            has_branding: record.has_branding,
            delivery_method: record.delivery_method,
            wants_meeting: record.wants_meeting,
            observations: record.observations,
            recommended_package: packages.recommended,
            alternative_packages: packages.alternatives,
            combos: packages.combos,
            selected_package: record.selected_package,
            status: record.status,
            view_count: record.view_count,
            is_expired,
            created_at: record.created_at,
            updated_at: record.updated_at,
            valid_until: record.valid_until,
            last_viewed_at: record.last_viewed_at,
            email_sent_at: record.email_sent_at,
        })
    }
}

/// Records a view and alerts the agency on the first one
pub(crate) async fn track_view(state: &AppState, id: &str) -> ApiResult<i64> {
    let outcome = state.storage.record_view(id, Utc::now()).await?;
    if outcome.first_view {
        info!(proposal_id = %id, "Proposal viewed for the first time");
        spawn_first_view_notice(state, id);
    }
    Ok(outcome.view_count)
}

/// Fetch a proposal; counts as a view
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<ProposalView>> {
    track_view(&state, &id).await?;
    let record = state.storage.get(&id).await?;

    let service_name = state.catalog.service_display_name(&record.main_service);
    let view = ProposalView::from_record(record, service_name, Utc::now())?;
    Ok(ok(view))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedView {
    pub view_count: i64,
}

pub async fn track_proposal_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<TrackedView>> {
    let view_count = track_view(&state, &id).await?;
    Ok(ok(TrackedView { view_count }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProposalRequest {
    pub status: String,
    #[serde(default)]
    pub selected_package: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProposal {
    pub id: String,
    pub status: ProposalStatus,
    pub selected_package: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Overwrite the status (any value, no transition rules) and the chosen package
pub async fn update_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProposalRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<UpdatedProposal>> {
    let request = json_body(body)?;
    let status: ProposalStatus = request
        .status
        .parse()
        .map_err(|_| AppError::validation(format!("Status inválido: {}", request.status)))?;

    let selected = request
        .selected_package
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let record = state
        .storage
        .update_status(&id, status, selected, Utc::now())
        .await?;

    info!(proposal_id = %id, status = %record.status, "Proposal status updated");

    Ok(ok(UpdatedProposal {
        id: record.id,
        status: record.status,
        selected_package: record.selected_package,
        updated_at: record.updated_at,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub proposal_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSent {
    pub message: String,
    pub dev_mode: bool,
}

/// Send (or resend) the proposal email and wait for the provider's answer
pub async fn send_proposal_email(
    _session: AdminSession,
    State(state): State<AppState>,
    body: Result<Json<SendEmailRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<EmailSent>> {
    let request = json_body(body)?;
    let record = state.storage.get(&request.proposal_id).await?;

    let delivery = deliver_proposal_email(&state, &record).await.map_err(|e| {
        warn!(proposal_id = %record.id, error = %e, "Manual email send failed");
        AppError::internal(e)
    })?;

    let message = if delivery.is_dev_mode() {
        "E-mail registrado no log (modo desenvolvimento)"
    } else {
        "E-mail enviado com sucesso"
    };

    Ok(ok(EmailSent {
        message: message.to_string(),
        dev_mode: delivery.is_dev_mode(),
    }))
}
