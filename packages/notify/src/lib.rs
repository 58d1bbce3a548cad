// ABOUTME: Outbound email for proposals: templates, the Resend client, and a dev-mode logger
// ABOUTME: Delivery is best effort; callers decide whether to await or spawn a send

pub mod error;
pub mod mailer;
pub mod templates;

pub use error::{NotifyError, NotifyResult};
pub use mailer::{mailer_from_config, Delivery, LogMailer, Mailer, OutgoingEmail, ResendMailer};
pub use templates::{FirstViewNotice, ProposalEmail};

/// Sender used when `EMAIL_FROM` is not configured
pub const DEFAULT_EMAIL_FROM: &str = "SKYZ DESIGN <onboarding@resend.dev>";
