// ABOUTME: HTTP API layer for the Skyz proposal service: REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod admin_handlers;
pub mod auth;
pub mod catalog_handlers;
pub mod documents_handlers;
pub mod error;
pub mod health;
pub mod intake;
mod notifications;
pub mod pagination;
pub mod panic;
pub mod proposals_handlers;
pub mod response;
pub mod state;

pub use error::{ApiResult, AppError};
pub use intake::{CreateProposalRequest, IntakeFormVersion};
pub use response::ApiResponse;
pub use state::{ApiSettings, AppState};

/// Proposal lifecycle and document routes (nested under /api/proposals)
pub fn create_proposals_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(proposals_handlers::create_proposal))
        .route("/send-email", post(proposals_handlers::send_proposal_email))
        .route(
            "/{id}",
            get(proposals_handlers::get_proposal).patch(proposals_handlers::update_proposal),
        )
        .route("/{id}/track", post(proposals_handlers::track_proposal_view))
        .route("/{id}/pdf", get(documents_handlers::download_pdf))
        .route("/{id}/docx", get(documents_handlers::download_docx))
}

/// Admin session and listing routes (nested under /api/admin)
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/auth",
            post(admin_handlers::login)
                .get(admin_handlers::check_session)
                .delete(admin_handlers::logout),
        )
        .route("/proposals", get(admin_handlers::list_proposals))
}

/// Catalog reference routes (nested under /api/catalog)
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/services", get(catalog_handlers::list_services))
        .route("/services/{id}", get(catalog_handlers::get_service))
        .route("/intake", get(catalog_handlers::intake_reference))
}

/// Full application router. CORS is left to the binary, which knows the allowed origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/status", get(health::status_check))
        .nest("/api/proposals", create_proposals_router())
        .nest("/api/admin", create_admin_router())
        .nest("/api/catalog", create_catalog_router())
        .route("/proposta/{id}", get(documents_handlers::proposal_page))
        .route("/proposta/{id}/escolher", post(documents_handlers::select_package))
        .layer(TraceLayer::new_for_http())
        .layer(panic::create_panic_handler())
        .with_state(state)
}
