// ABOUTME: Admin listing types: filters, whitelisted sort columns, summaries, and status counts
// ABOUTME: Sort keys map to fixed SQL fragments so user input never reaches the query text

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skz_core::{Money, ProposalStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    ClientName,
    ProposalNumber,
    Status,
    ViewCount,
    ValidUntil,
    RecommendedPrice,
}

impl SortField {
    /// Accepts both camelCase and snake_case names. Unknown names yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "createdAt" | "created_at" => Some(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortField::UpdatedAt),
            "clientName" | "client_name" => Some(SortField::ClientName),
            "proposalNumber" | "proposal_number" => Some(SortField::ProposalNumber),
            "status" => Some(SortField::Status),
            "viewCount" | "view_count" => Some(SortField::ViewCount),
            "validUntil" | "valid_until" => Some(SortField::ValidUntil),
            "recommendedPrice" | "recommended_price" | "price" => Some(SortField::RecommendedPrice),
            _ => None,
        }
    }

    pub(crate) fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ClientName => "client_name COLLATE NOCASE",
            SortField::ProposalNumber => "proposal_number",
            SortField::Status => "status",
            SortField::ViewCount => "view_count",
            SortField::ValidUntil => "valid_until",
            SortField::RecommendedPrice => "recommended_price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters and window for the admin listing
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub status: Option<ProposalStatus>,
    /// Matched against client name, email, company, and proposal number
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub offset: i64,
    pub limit: i64,
}

/// One row of the admin listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub id: String,
    pub proposal_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_company: Option<String>,
    pub main_service: String,
    pub service_option: Option<String>,
    pub status: ProposalStatus,
    pub selected_package: Option<String>,
    pub view_count: i64,
    /// Price of the recommended package, zero when the stored blob is unreadable
    pub recommended_price: Money,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub email_sent_at: Option<DateTime<Utc>>,
}

/// Proposal totals per status, over the whole table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: i64,
    pub draft: i64,
    pub sent: i64,
    pub viewed: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub expired: i64,
}

impl StatusCounts {
    pub fn add(&mut self, status: ProposalStatus, count: i64) {
        let slot = match status {
            ProposalStatus::Draft => &mut self.draft,
            ProposalStatus::Sent => &mut self.sent,
            ProposalStatus::Viewed => &mut self.viewed,
            ProposalStatus::Accepted => &mut self.accepted,
            ProposalStatus::Rejected => &mut self.rejected,
            ProposalStatus::Expired => &mut self.expired,
        };
        *slot += count;
        self.total += count;
    }

    pub fn get(&self, status: ProposalStatus) -> i64 {
        match status {
            ProposalStatus::Draft => self.draft,
            ProposalStatus::Sent => self.sent,
            ProposalStatus::Viewed => self.viewed,
            ProposalStatus::Accepted => self.accepted,
            ProposalStatus::Rejected => self.rejected,
            ProposalStatus::Expired => self.expired,
        }
    }
}

/// Escapes `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern
pub(crate) fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_params() {
        assert_eq!(SortField::from_param("clientName"), Some(SortField::ClientName));
        assert_eq!(SortField::from_param("view_count"), Some(SortField::ViewCount));
        assert_eq!(SortField::from_param("id; DROP TABLE proposals"), None);
        assert_eq!(SortOrder::from_param("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::from_param("sideways"), None);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("ana"), "%ana%");
    }

    #[test]
    fn test_status_counts() {
        let mut counts = StatusCounts::default();
        counts.add(ProposalStatus::Sent, 3);
        counts.add(ProposalStatus::Viewed, 2);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.get(ProposalStatus::Sent), 3);
        assert_eq!(counts.get(ProposalStatus::Accepted), 0);
    }
}
