// ABOUTME: Best-effort email side channel for proposal delivery and first-view alerts
// ABOUTME: Spawned tasks are never awaited by the request and never retried; failures are logged

use chrono::Utc;
use skz_core::ProposalRecord;
use skz_notify::{Delivery, FirstViewNotice, NotifyError, ProposalEmail};
use tracing::{info, warn};

use crate::state::AppState;

/// Sends the proposal email to the client and stamps `email_sent_at` on delivery
pub(crate) async fn deliver_proposal_email(
    state: &AppState,
    record: &ProposalRecord,
) -> Result<Delivery, NotifyError> {
    let service_name = state
        .catalog
        .get_service_by_id(&record.main_service)
        .map(|s| s.name.as_str());
    let message = ProposalEmail::from_record(record, service_name, &state.proposal_url(&record.id))
        .to_email(&record.client_email);

    let delivery = state.mailer.send(&message).await?;

    if let Err(e) = state.storage.mark_email_sent(&record.id, Utc::now()).await {
        warn!(proposal_id = %record.id, error = %e, "Email went out but email_sent_at was not recorded");
    }
    Ok(delivery)
}

/// Fire-and-forget proposal email
pub(crate) fn spawn_proposal_email(state: AppState, record: ProposalRecord) {
    tokio::spawn(async move {
        match deliver_proposal_email(&state, &record).await {
            Ok(delivery) => info!(
                proposal_id = %record.id,
                dev_mode = delivery.is_dev_mode(),
                "Proposal email delivered"
            ),
            Err(e) => warn!(proposal_id = %record.id, error = %e, "Proposal email failed"),
        }
    });
}

/// Fire-and-forget alert to the agency when a proposal is opened for the first time
pub(crate) fn spawn_first_view_notice(state: &AppState, proposal_id: &str) {
    let Some(recipient) = state.notification_email.clone() else {
        return;
    };
    let state = state.clone();
    let proposal_id = proposal_id.to_string();

    tokio::spawn(async move {
        let record = match state.storage.find(&proposal_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return,
            Err(e) => {
                warn!(proposal_id = %proposal_id, error = %e, "Could not load proposal for first-view alert");
                return;
            }
        };

        let notice = FirstViewNotice::from_record(&record, &state.proposal_url(&record.id), Utc::now());
        match state.mailer.send(&notice.to_email(&recipient)).await {
            Ok(_) => info!(proposal_id = %proposal_id, "First-view alert sent"),
            Err(e) => warn!(proposal_id = %proposal_id, error = %e, "First-view alert failed"),
        }
    });
}
