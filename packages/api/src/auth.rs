// ABOUTME: Admin session extraction and cookie helpers
// ABOUTME: The session is a signed token in the admin_token cookie, checked on every admin request

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use chrono::{DateTime, Utc};
use skz_security::{ADMIN_TOKEN_COOKIE, ADMIN_TOKEN_TTL_HOURS};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Value of a named cookie from the request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn cookie_attributes(secure: bool) -> &'static str {
    if secure {
        "Path=/; HttpOnly; SameSite=Strict; Secure"
    } else {
        "Path=/; HttpOnly; SameSite=Strict"
    }
}

/// `Set-Cookie` value carrying a freshly issued admin token
pub fn session_cookie(
    token: &str,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={}; {}; Max-Age={}; Expires={}",
        ADMIN_TOKEN_COOKIE,
        token,
        cookie_attributes(secure),
        ADMIN_TOKEN_TTL_HOURS * 3600,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT"),
    );
    HeaderValue::from_str(&cookie).map_err(AppError::internal)
}

/// `Set-Cookie` value that removes the admin token
pub fn cleared_session_cookie(secure: bool) -> HeaderValue {
    let cookie = format!(
        "{}=; {}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        ADMIN_TOKEN_COOKIE,
        cookie_attributes(secure),
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static("admin_token=; Max-Age=0"))
}

/// An authenticated admin request
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Validates the admin cookie of a request against the configured password
    pub fn from_headers(headers: &HeaderMap, state: &AppState) -> Result<Self, AppError> {
        let admin = state
            .admin
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Não autenticado"))?;
        let token = read_cookie(headers, ADMIN_TOKEN_COOKIE)
            .ok_or_else(|| AppError::unauthorized("Não autenticado"))?;

        let expires_at = admin.signer.verify(&token, Utc::now()).map_err(|e| {
            debug!(error = %e, "Rejected admin token");
            AppError::unauthorized("Sessão inválida ou expirada")
        })?;
        Ok(AdminSession { expires_at })
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        AdminSession::from_headers(&parts.headers, state)
    }
}
