// ABOUTME: HTTP error type shared by all handlers
// ABOUTME: Maps domain errors to status codes and sanitized JSON bodies

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use skz_documents::DocumentError;
use skz_recommend::RecommendError;
use skz_storage::StorageError;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Field name to message, serialized in a stable order
pub type FieldErrors = BTreeMap<String, String>;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: FieldErrors,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Recommendation error: {0}")]
    Recommend(#[from] RecommendError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<FieldErrors>,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    pub(crate) fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::Storage(StorageError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Document(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DOCUMENT_ERROR"),
            AppError::Recommend(RecommendError::UnknownService(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    pub(crate) fn to_user_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::NotFound(message) => message.clone(),
            AppError::Unauthorized(message) => message.clone(),
            AppError::Configuration(message) => message.clone(),
            AppError::Storage(StorageError::NotFound(_)) => "Proposta não encontrada".to_string(),
            AppError::Recommend(RecommendError::UnknownService(id)) => {
                format!("Serviço desconhecido: {}", id)
            }
            AppError::Internal(_) | AppError::Storage(_) | AppError::Document(_) => {
                "Erro interno do servidor".to_string()
            }
        }
    }

    fn details(&self) -> Option<FieldErrors> {
        match self {
            AppError::Validation { details, .. } if !details.is_empty() => Some(details.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        if status_code.is_server_error() {
            // Full context stays in the log; the body only carries the generic message
            error!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "Request failed"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_user_message(),
                details: self.details(),
            },
            request_id,
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper functions for common error scenarios
impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: FieldErrors::new(),
        }
    }

    /// Field errors of the intake form; `step` names the page to send the client back to
    pub fn invalid_fields(details: FieldErrors, step: Option<u8>) -> Self {
        let message = match step {
            Some(step) => format!("Dados inválidos no formulário (etapa {})", step),
            None => "Dados inválidos no formulário".to_string(),
        };
        Self::Validation { message, details }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let error = AppError::from(StorageError::NotFound("abc".to_string()));
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(error.to_user_message(), "Proposta não encontrada");
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal_error = AppError::internal(anyhow::anyhow!(
            "Database connection failed with password xyz"
        ));
        let message = internal_error.to_user_message();
        assert_eq!(message, "Erro interno do servidor");
        assert!(!message.contains("xyz"));
    }

    #[tokio::test]
    async fn test_validation_body_carries_field_details() {
        let mut details = FieldErrors::new();
        details.insert("clientEmail".to_string(), "E-mail inválido".to_string());
        let response = AppError::invalid_fields(details, Some(2)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "Dados inválidos no formulário (etapa 2)");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["clientEmail"], "E-mail inválido");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_document_errors_are_generic_500() {
        let parse_error = serde_json::from_str::<Value>("{oops").unwrap_err();
        let response = AppError::from(DocumentError::MalformedPackages(parse_error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Erro interno do servidor");
        assert!(body["error"].get("details").is_none());
    }
}
