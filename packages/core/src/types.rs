use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

/// Service category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Design,
    Web,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Web => "web",
        }
    }

    /// Display label used in documents and the intake form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Design => "Design & Social Media",
            Category::Web => "Desenvolvimento Web",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "design" => Ok(Category::Design),
            "web" => Ok(Category::Web),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Requested delivery urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Urgente,
    #[default]
    Normal,
    Flexivel,
}

impl Timeline {
    pub const ALL: [Timeline; 3] = [Timeline::Urgente, Timeline::Normal, Timeline::Flexivel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Urgente => "urgente",
            Timeline::Normal => "normal",
            Timeline::Flexivel => "flexivel",
        }
    }

    /// Label printed in proposal documents
    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Urgente => "Entrega Urgente (até 3 dias)",
            Timeline::Normal => "Prazo Normal (1-2 semanas)",
            Timeline::Flexivel => "Prazo Flexível",
        }
    }

    /// Shorter label offered as a choice on the intake form
    pub fn choice_label(&self) -> &'static str {
        match self {
            Timeline::Urgente => "Urgente (até 3 dias)",
            Timeline::Normal => "Normal (1-2 semanas)",
            Timeline::Flexivel => "Flexível (sem pressa)",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgente" => Ok(Timeline::Urgente),
            "normal" => Ok(Timeline::Normal),
            "flexivel" => Ok(Timeline::Flexivel),
            other => Err(format!("Unknown timeline: {}", other)),
        }
    }
}

/// Lifecycle status of a stored proposal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 6] = [
        ProposalStatus::Draft,
        ProposalStatus::Sent,
        ProposalStatus::Viewed,
        ProposalStatus::Accepted,
        ProposalStatus::Rejected,
        ProposalStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "DRAFT",
            ProposalStatus::Sent => "SENT",
            ProposalStatus::Viewed => "VIEWED",
            ProposalStatus::Accepted => "ACCEPTED",
            ProposalStatus::Rejected => "REJECTED",
            ProposalStatus::Expired => "EXPIRED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "Rascunho",
            ProposalStatus::Sent => "Enviada",
            ProposalStatus::Viewed => "Visualizada",
            ProposalStatus::Accepted => "Aceita",
            ProposalStatus::Rejected => "Recusada",
            ProposalStatus::Expired => "Expirada",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(ProposalStatus::Draft),
            "SENT" => Ok(ProposalStatus::Sent),
            "VIEWED" => Ok(ProposalStatus::Viewed),
            "ACCEPTED" => Ok(ProposalStatus::Accepted),
            "REJECTED" => Ok(ProposalStatus::Rejected),
            "EXPIRED" => Ok(ProposalStatus::Expired),
            _ => Err(format!("Unknown proposal status: {}", s)),
        }
    }
}

/// A priced offer shown to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecommendation {
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    pub description: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub delivery_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Savings {
    pub total: Money,
    pub percentage: u32,
}

/// Output of the recommendation engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended: PackageRecommendation,
    pub alternatives: Vec<PackageRecommendation>,
    pub combos: Vec<PackageRecommendation>,
    pub savings: Savings,
}

/// The three package slots of a stored proposal, parsed from their JSON columns
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPackages {
    pub recommended: PackageRecommendation,
    pub alternatives: Vec<PackageRecommendation>,
    pub combos: Vec<PackageRecommendation>,
}

/// Everything needed to persist a freshly generated proposal
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_segment: Option<String>,
    pub category: Category,
    pub main_service: String,
    pub service_option: Option<String>,
    pub challenges: Vec<String>,
    pub timeline: Timeline,
    pub budget: Option<String>,
    pub has_branding: Option<String>,
    pub delivery_method: Vec<String>,
    pub wants_meeting: bool,
    pub observations: Option<String>,
    pub send_by_email: bool,
    pub send_by_whatsapp: bool,
    pub recommendation: Recommendation,
}

/// A proposal as stored. Package slots stay as raw JSON until rendered.
#[derive(Debug, Clone)]
pub struct ProposalRecord {
    pub id: String,
    pub proposal_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_segment: Option<String>,
    pub category: Category,
    pub main_service: String,
    pub service_option: Option<String>,
    pub challenges: Vec<String>,
    pub timeline: Timeline,
    pub budget: Option<String>,
    pub has_branding: Option<String>,
    pub delivery_method: Vec<String>,
    pub wants_meeting: bool,
    pub observations: Option<String>,
    pub send_by_email: bool,
    pub send_by_whatsapp: bool,
    pub recommended_package_json: String,
    pub alternative_packages_json: String,
    pub combos_json: String,
    pub selected_package: Option<String>,
    pub status: ProposalStatus,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub email_sent_at: Option<DateTime<Utc>>,
}

impl ProposalRecord {
    /// Display-only expiry check; the stored status is never rewritten to EXPIRED.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now
    }

    /// Parses the three package blobs.
    pub fn packages(&self) -> Result<ProposalPackages, serde_json::Error> {
        Ok(ProposalPackages {
            recommended: serde_json::from_str(&self.recommended_package_json)?,
            alternatives: serde_json::from_str(&self.alternative_packages_json)?,
            combos: serde_json::from_str(&self.combos_json)?,
        })
    }

    /// Price of the recommended package, zero when the blob cannot be read.
    pub fn recommended_price(&self) -> Money {
        serde_json::from_str::<PackageRecommendation>(&self.recommended_package_json)
            .map(|p| p.price)
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn package(price: i64) -> PackageRecommendation {
        PackageRecommendation {
            id: "landing_page".to_string(),
            name: "Landing Page".to_string(),
            price: Money::from_reais(price),
            original_price: None,
            discount_percent: None,
            description: "desc".to_string(),
            includes: vec![],
            benefits: vec![],
            delivery_time: "5 dias".to_string(),
            tag: None,
            is_recommended: true,
        }
    }

    fn record(recommended_json: String) -> ProposalRecord {
        let now = Utc::now();
        ProposalRecord {
            id: "id".to_string(),
            proposal_number: "SKZ-20260101-001".to_string(),
            client_name: "Ana".to_string(),
            client_email: "ana@example.com".to_string(),
            client_phone: None,
            client_company: None,
            client_segment: None,
            category: Category::Web,
            main_service: "landing_page".to_string(),
            service_option: None,
            challenges: vec![],
            timeline: Timeline::Normal,
            budget: None,
            has_branding: None,
            delivery_method: vec![],
            wants_meeting: false,
            observations: None,
            send_by_email: true,
            send_by_whatsapp: false,
            recommended_package_json: recommended_json,
            alternative_packages_json: "[]".to_string(),
            combos_json: "[]".to_string(),
            selected_package: None,
            status: ProposalStatus::Sent,
            view_count: 0,
            created_at: now,
            updated_at: now,
            valid_until: now + Duration::days(15),
            last_viewed_at: None,
            email_sent_at: None,
        }
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in ProposalStatus::ALL {
            assert_eq!(status.as_str().parse::<ProposalStatus>().unwrap(), status);
        }
        assert!("ARCHIVED".parse::<ProposalStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&ProposalStatus::Viewed).unwrap(),
            "\"VIEWED\""
        );
    }

    #[test]
    fn test_timeline_parsing() {
        assert_eq!("urgente".parse::<Timeline>().unwrap(), Timeline::Urgente);
        assert_eq!("flexivel".parse::<Timeline>().unwrap(), Timeline::Flexivel);
        assert!("asap".parse::<Timeline>().is_err());
        assert_eq!(Timeline::default(), Timeline::Normal);
    }

    #[test]
    fn test_is_expired_uses_valid_until() {
        let rec = record(serde_json::to_string(&package(697)).unwrap());
        assert!(!rec.is_expired(rec.created_at));
        assert!(rec.is_expired(rec.valid_until + Duration::seconds(1)));
    }

    #[test]
    fn test_recommended_price_falls_back_to_zero() {
        let rec = record(serde_json::to_string(&package(697)).unwrap());
        assert_eq!(rec.recommended_price(), Money::from_reais(697));

        let broken = record("{not json".to_string());
        assert_eq!(broken.recommended_price(), Money::ZERO);
        assert!(broken.packages().is_err());
    }
}
