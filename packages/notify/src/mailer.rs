use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use skz_core::is_valid_email;
use tracing::{error, info};

use crate::error::{NotifyError, NotifyResult};
use crate::DEFAULT_EMAIL_FROM;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingEmail {
    fn validate(&self) -> NotifyResult<()> {
        if self.to.is_empty() {
            return Err(NotifyError::InvalidEmail("no recipients".to_string()));
        }
        match self.to.iter().find(|addr| !is_valid_email(addr)) {
            Some(bad) => Err(NotifyError::InvalidEmail(bad.clone())),
            None => Ok(()),
        }
    }
}

/// How a message left the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the email API
    Sent { id: Option<String> },
    /// Written to the log only (no API key configured)
    Logged,
}

impl Delivery {
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Delivery::Logged)
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> NotifyResult<Delivery>;

    /// True when messages are only logged
    fn is_dev_mode(&self) -> bool {
        false
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

/// Client for the Resend transactional email API
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
        })
    }

    /// Point the client at another endpoint (used against mock servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> NotifyResult<Delivery> {
        email.validate()?;

        let request = ResendRequest {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Email API request timed out after {}s", REQUEST_TIMEOUT_SECS);
                    NotifyError::ApiError(format!(
                        "Request timed out after {} seconds",
                        REQUEST_TIMEOUT_SECS
                    ))
                } else {
                    error!("Email API request failed: {}", e);
                    NotifyError::RequestFailed(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            error!("Email API error: {} - {}", status, message);
            return Err(NotifyError::ApiError(format!(
                "API returned {}: {}",
                status, message
            )));
        }

        let id = response
            .json::<ResendResponse>()
            .await
            .ok()
            .and_then(|r| r.id);

        info!(to = ?email.to, id = ?id, "Email sent");
        Ok(Delivery::Sent { id })
    }
}

/// Dev-mode mailer: logs the message and reports it as delivered
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> NotifyResult<Delivery> {
        email.validate()?;
        info!(
            to = ?email.to,
            subject = %email.subject,
            "Email simulation (set RESEND_API_KEY to send for real)"
        );
        Ok(Delivery::Logged)
    }

    fn is_dev_mode(&self) -> bool {
        true
    }
}

/// Resend when an API key is configured, the logging mailer otherwise
pub fn mailer_from_config(
    api_key: Option<&str>,
    from: Option<&str>,
) -> NotifyResult<Arc<dyn Mailer>> {
    match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => {
            let from = from.unwrap_or(DEFAULT_EMAIL_FROM);
            info!("Sending email through Resend as {}", from);
            Ok(Arc::new(ResendMailer::new(key, from)?))
        }
        None => {
            info!("RESEND_API_KEY not set - emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &[&str]) -> OutgoingEmail {
        OutgoingEmail {
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: "Oi".to_string(),
            html: "<p>Oi</p>".to_string(),
            text: "Oi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_mailer_reports_dev_mode() {
        let delivery = LogMailer.send(&email(&["ana@example.com"])).await.unwrap();
        assert_eq!(delivery, Delivery::Logged);
        assert!(delivery.is_dev_mode());
        assert!(LogMailer.is_dev_mode());
    }

    #[tokio::test]
    async fn test_invalid_recipients_are_rejected() {
        let err = LogMailer.send(&email(&[])).await.unwrap_err();
        assert!(matches!(err, NotifyError::InvalidEmail(_)));

        let err = LogMailer.send(&email(&["not-an-email"])).await.unwrap_err();
        assert!(matches!(err, NotifyError::InvalidEmail(ref addr) if addr == "not-an-email"));
    }

    #[test]
    fn test_mailer_from_config_picks_backend() {
        assert!(mailer_from_config(None, None).unwrap().is_dev_mode());
        assert!(mailer_from_config(Some("  "), None).unwrap().is_dev_mode());
        assert!(!mailer_from_config(Some("re_123"), Some("Skyz <a@b.com>"))
            .unwrap()
            .is_dev_mode());
    }
}
