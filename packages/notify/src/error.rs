use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Email API error: {0}")]
    ApiError(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
