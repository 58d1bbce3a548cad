// ABOUTME: Shared utility functions for the proposal service
// ABOUTME: ID and proposal-number generation, validity window, pt-BR date formatting

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rand::Rng;

use crate::constants::{PROPOSAL_NUMBER_PREFIX, PROPOSAL_VALIDITY_DAYS};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Generate a proposal ID (UUID v4)
pub fn generate_proposal_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a proposal number like `SKZ-20261019-042`.
///
/// The three-digit suffix is random, so callers must check uniqueness.
pub fn generate_proposal_number<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..1000);
    format!(
        "{}-{:04}{:02}{:02}-{:03}",
        PROPOSAL_NUMBER_PREFIX,
        date.year(),
        date.month(),
        date.day(),
        suffix
    )
}

/// Expiry timestamp for a proposal created at `created_at`
pub fn valid_until(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(PROPOSAL_VALIDITY_DAYS)
}

/// `05 de outubro de 2026`
pub fn format_long_date(date: DateTime<Utc>) -> String {
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{:02} de {} de {}", date.day(), month, date.year())
}

/// `05/10/2026`
pub fn format_short_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Escape text for interpolation into HTML markup
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
