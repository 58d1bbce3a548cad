use std::sync::Arc;

use skz_catalog::{CompanyProfile, ServiceCatalog};
use skz_notify::Mailer;
use skz_security::AdminTokenSigner;
use skz_storage::ProposalStorage;

/// Deployment settings the handlers need at request time
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Public origin used to build links in responses and emails
    pub base_url: String,
    pub admin_password: Option<String>,
    /// Recipient of first-view alerts
    pub notification_email: Option<String>,
    pub cookie_secure: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            admin_password: None,
            notification_email: None,
            cookie_secure: false,
        }
    }
}

/// Configured admin credentials; the password doubles as the token signing key
pub struct AdminAuth {
    pub(crate) password: String,
    pub(crate) signer: AdminTokenSigner,
}

impl AdminAuth {
    fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
            signer: AdminTokenSigner::new(password.as_bytes()),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ServiceCatalog>,
    pub company: Arc<CompanyProfile>,
    pub storage: ProposalStorage,
    pub mailer: Arc<dyn Mailer>,
    pub(crate) admin: Option<Arc<AdminAuth>>,
    pub(crate) base_url: Arc<str>,
    pub(crate) notification_email: Option<Arc<str>>,
    pub(crate) cookie_secure: bool,
}

impl AppState {
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        company: Arc<CompanyProfile>,
        storage: ProposalStorage,
        mailer: Arc<dyn Mailer>,
        settings: ApiSettings,
    ) -> Self {
        let admin = settings
            .admin_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| Arc::new(AdminAuth::new(p)));

        Self {
            catalog,
            company,
            storage,
            mailer,
            admin,
            base_url: Arc::from(settings.base_url.trim_end_matches('/')),
            notification_email: settings.notification_email.map(Arc::from),
            cookie_secure: settings.cookie_secure,
        }
    }

    /// Shareable viewer page of a proposal
    pub fn proposal_url(&self, id: &str) -> String {
        format!("{}/proposta/{}", self.base_url, id)
    }

    pub(crate) fn document_url(&self, id: &str, extension: &str) -> String {
        format!("{}/api/proposals/{}/{}", self.base_url, id, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_urls_ignore_trailing_slash() {
        let settings = ApiSettings {
            base_url: "https://propostas.skyz.test/".to_string(),
            ..ApiSettings::default()
        };
        let state = AppState::new(
            Arc::new(ServiceCatalog::standard()),
            Arc::new(CompanyProfile::skyz()),
            ProposalStorage::new(skz_storage::connect_in_memory().await.unwrap()),
            Arc::new(skz_notify::LogMailer),
            settings,
        );
        assert_eq!(state.proposal_url("abc"), "https://propostas.skyz.test/proposta/abc");
        assert_eq!(
            state.document_url("abc", "pdf"),
            "https://propostas.skyz.test/api/proposals/abc/pdf"
        );
        assert!(state.admin.is_none());
    }
}
