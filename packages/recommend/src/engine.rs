use serde::Deserialize;
use skz_catalog::{BudgetBracket, ServiceCatalog, ServiceCatalogEntry, ServiceOption};
use skz_core::{Money, PackageRecommendation, Recommendation, Savings, Timeline};
use thiserror::Error;
use tracing::debug;

use crate::{alternatives, combos};

const URGENT_SURCHARGE_PERCENT: i64 = 130;
const FLEXIBLE_DISCOUNT_PERCENT: i64 = 95;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Service not found: {0}")]
    UnknownService(String),
}

/// What the client asked for
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub service: String,
    #[serde(default)]
    pub service_option: Option<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub budget: Option<String>,
}

/// Pure recommendation rules over a borrowed catalog.
///
/// No clock, randomness or I/O: identical input yields identical output.
pub struct RecommendationEngine<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        RecommendationEngine { catalog }
    }

    pub fn recommend(&self, input: &RecommendationInput) -> Result<Recommendation, RecommendError> {
        let service = self
            .catalog
            .get_service_by_id(&input.service)
            .ok_or_else(|| RecommendError::UnknownService(input.service.clone()))?;

        let option_id = input
            .service_option
            .as_deref()
            .filter(|id| !id.is_empty());
        let bracket = BudgetBracket::resolve(input.budget.as_deref());

        let recommended = recommended_package(service, option_id, input.timeline);
        let alternatives = alternatives::build(self.catalog, service, option_id, &bracket);
        let combos = combos::build(self.catalog, service, &input.challenges, &bracket);
        let savings = savings(&combos);

        debug!(
            service = %service.id,
            option = ?option_id,
            alternatives = alternatives.len(),
            combos = combos.len(),
            "Generated recommendation"
        );

        Ok(Recommendation {
            recommended,
            alternatives,
            combos,
            savings,
        })
    }
}

fn recommended_package(
    service: &ServiceCatalogEntry,
    option_id: Option<&str>,
    timeline: Timeline,
) -> PackageRecommendation {
    let selected: Option<&ServiceOption> = option_id.and_then(|id| service.option(id));
    let list_price = selected.map(|o| o.price).unwrap_or(service.base_price);

    let (price, delivery_time) = match timeline {
        Timeline::Urgente => (
            list_price.percent_of(URGENT_SURCHARGE_PERCENT),
            "Entrega expressa (até 3 dias)".to_string(),
        ),
        Timeline::Flexivel => (
            list_price.percent_of(FLEXIBLE_DISCOUNT_PERCENT),
            "Prazo flexível (combinamos juntos)".to_string(),
        ),
        Timeline::Normal => (list_price, service.delivery_time.clone()),
    };

    let id = match option_id {
        Some(option) => format!("{}-{}", service.id, option),
        None => service.id.clone(),
    };
    let name = match selected {
        Some(option) => format!("{} - {}", service.name, option.name),
        None => service.name.clone(),
    };
    let description = selected
        .map(|o| o.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("{} profissional", service.name));

    PackageRecommendation {
        id,
        name,
        price,
        original_price: None,
        discount_percent: None,
        description,
        includes: service.includes.clone(),
        benefits: service.benefits.clone(),
        delivery_time,
        tag: Some("Recomendado".to_string()),
        is_recommended: true,
    }
}

/// Savings of the first discounted combo, zero without one
fn savings(combos: &[PackageRecommendation]) -> Savings {
    combos
        .iter()
        .find(|c| c.discount_percent.is_some())
        .and_then(|combo| {
            combo.original_price.map(|original| Savings {
                total: original - combo.price,
                percentage: original.discount_percent_to(combo.price),
            })
        })
        .unwrap_or(Savings {
            total: Money::ZERO,
            percentage: 0,
        })
}
