// ABOUTME: HTTP request handlers for the admin area
// ABOUTME: Password login into a signed cookie, session check, logout, and the proposal listing

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skz_core::ProposalStatus;
use skz_security::verify_admin_password;
use skz_storage::{ListQuery, ProposalSummary, SortField, SortOrder, StatusCounts};
use tracing::{info, warn};

use crate::auth::{cleared_session_cookie, session_cookie, AdminSession};
use crate::error::{ApiResult, AppError};
use crate::pagination::{PageWindow, PaginationMeta};
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Exchange the admin password for a session cookie
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) =
        body.map_err(|_| AppError::validation("Corpo da requisição inválido"))?;

    let admin = state
        .admin
        .as_ref()
        .ok_or_else(|| AppError::config("Autenticação não configurada no servidor"))?;

    if !verify_admin_password(&request.password, &admin.password) {
        warn!("Admin login rejected");
        return Err(AppError::unauthorized("Senha incorreta"));
    }

    let (token, expires_at) = admin
        .signer
        .issue(Utc::now())
        .map_err(AppError::internal)?;
    let cookie = session_cookie(&token, expires_at, state.cookie_secure)?;

    info!(expires_at = %expires_at, "Admin logged in");

    let body = ok(SessionStatus {
        authenticated: true,
        expires_at: Some(expires_at),
    });
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

/// Report whether the request carries a valid admin session
pub async fn check_session(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Response {
    match AdminSession::from_headers(&headers, &state) {
        Ok(session) => ok(SessionStatus {
            authenticated: true,
            expires_at: Some(session.expires_at),
        })
        .into_response(),
        Err(e) => {
            let body = ApiResponse {
                success: false,
                data: Some(SessionStatus {
                    authenticated: false,
                    expires_at: None,
                }),
                error: Some(e.to_user_message()),
            };
            (StatusCode::UNAUTHORIZED, body).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoggedOut {
    pub message: String,
}

pub async fn logout(State(state): State<AppState>) -> Response {
    let body = ok(LoggedOut {
        message: "Sessão encerrada".to_string(),
    });
    (
        [(header::SET_COOKIE, cleared_session_cookie(state.cookie_secure))],
        body,
    )
        .into_response()
}

/// Query string of the admin listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl AdminListParams {
    fn pagination(&self) -> PageWindow {
        PageWindow::from_query(self.page, self.limit)
    }

    /// Translate the raw parameters into a storage query; unknown values are rejected
    fn to_list_query(&self, pagination: &PageWindow) -> ApiResult<ListQuery> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(value) => Some(
                value
                    .parse::<ProposalStatus>()
                    .map_err(|_| AppError::validation(format!("Status inválido: {}", value)))?,
            ),
        };

        let sort_by = match self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            None => SortField::default(),
            Some(value) => SortField::from_param(value).ok_or_else(|| {
                AppError::validation(format!("Campo de ordenação inválido: {}", value))
            })?,
        };

        let sort_order = match self.sort_order.as_deref().filter(|s| !s.is_empty()) {
            None => SortOrder::default(),
            Some(value) => SortOrder::from_param(value).ok_or_else(|| {
                AppError::validation(format!("Ordem inválida: {}", value))
            })?,
        };

        Ok(ListQuery {
            status,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort_by,
            sort_order,
            offset: pagination.offset(),
            limit: pagination.limit(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AdminProposalList {
    pub proposals: Vec<ProposalSummary>,
    pub pagination: PaginationMeta,
    pub stats: StatusCounts,
}

/// Filtered, paginated proposal listing with per-status totals
pub async fn list_proposals(
    _session: AdminSession,
    State(state): State<AppState>,
    params: Result<Query<AdminListParams>, QueryRejection>,
) -> ApiResult<ApiResponse<AdminProposalList>> {
    let Query(params) =
        params.map_err(|e| AppError::validation(format!("Parâmetros inválidos: {}", e.body_text())))?;

    let pagination = params.pagination();
    let query = params.to_list_query(&pagination)?;

    let (proposals, total) = state.storage.list(&query).await?;
    let stats = state.storage.status_counts().await?;

    Ok(ok(AdminProposalList {
        proposals,
        pagination: PaginationMeta::new(&pagination, total),
        stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_params_defaults() {
        let params = AdminListParams::default();
        let query = params.to_list_query(&params.pagination()).unwrap();
        assert_eq!(query.status, None);
        assert_eq!(query.search, None);
        assert_eq!(query.sort_by, SortField::CreatedAt);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_list_params_all_status_means_no_filter() {
        let params = AdminListParams {
            status: Some("all".to_string()),
            search: Some("  ".to_string()),
            page: Some(3),
            limit: Some(10),
            ..AdminListParams::default()
        };
        let query = params.to_list_query(&params.pagination()).unwrap();
        assert_eq!(query.status, None);
        assert_eq!(query.search, None);
        assert_eq!(query.offset, 20);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_list_params_reject_unknown_sort_column() {
        let params = AdminListParams {
            sort_by: Some("client_email; DROP TABLE proposals".to_string()),
            ..AdminListParams::default()
        };
        let err = params.to_list_query(&params.pagination()).unwrap_err();
        assert_eq!(err.to_status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_list_params_status_is_case_insensitive() {
        let params = AdminListParams {
            status: Some("viewed".to_string()),
            sort_order: Some("ASC".to_string()),
            ..AdminListParams::default()
        };
        let query = params.to_list_query(&params.pagination()).unwrap();
        assert_eq!(query.status, Some(ProposalStatus::Viewed));
        assert_eq!(query.sort_order, SortOrder::Asc);
    }
}
