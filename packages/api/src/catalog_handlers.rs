// ABOUTME: Read-only catalog endpoints feeding the intake form
// ABOUTME: Services, challenge and budget choices, timelines, and the step layout

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use serde::{Deserialize, Serialize};
use skz_catalog::{
    challenges::CHALLENGES, BudgetBracket, Challenge, ChoiceOption, ServiceCatalogEntry,
    DELIVERY_METHODS, HAS_BRANDING_CHOICES, MEETING_CHOICES, SEGMENTS,
};
use skz_core::{Category, Timeline};

use crate::error::{ApiResult, AppError};
use crate::intake::{IntakeFormVersion, IntakeStep};
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    pub category: Option<String>,
}

pub async fn list_services(
    State(state): State<AppState>,
    query: Result<Query<ServicesQuery>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<ServiceCatalogEntry>>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let services = match query.category.as_deref().filter(|c| !c.is_empty()) {
        None => state.catalog.services().to_vec(),
        Some(category) => {
            let category: Category = category
                .parse()
                .map_err(|_| AppError::validation(format!("Categoria inválida: {}", category)))?;
            state
                .catalog
                .get_services_by_category(category)
                .into_iter()
                .cloned()
                .collect()
        }
    };

    Ok(ok(services))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<ServiceCatalogEntry>> {
    state
        .catalog
        .get_service_by_id(&id)
        .cloned()
        .map(ok)
        .ok_or_else(|| AppError::NotFound("Serviço não encontrado".to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChoice {
    pub value: Category,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineChoice {
    pub value: Timeline,
    pub label: &'static str,
}

/// Budget bracket pre-selected when a service is picked
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedBudget {
    pub service_id: String,
    pub budget: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReference {
    pub version: IntakeFormVersion,
    pub steps: &'static [IntakeStep],
    pub categories: Vec<CategoryChoice>,
    pub challenges: &'static [Challenge],
    pub budgets: &'static [BudgetBracket],
    pub timelines: Vec<TimelineChoice>,
    pub segments: &'static [ChoiceOption],
    pub delivery_methods: &'static [ChoiceOption],
    pub meeting_choices: &'static [ChoiceOption],
    pub branding_choices: &'static [ChoiceOption],
    pub suggested_budgets: Vec<SuggestedBudget>,
}

/// Everything the three-step form needs to render its choices
pub async fn intake_reference(State(state): State<AppState>) -> ApiResponse<IntakeReference> {
    let version = IntakeFormVersion::Optimized;

    ok(IntakeReference {
        version,
        steps: version.steps(),
        categories: [Category::Design, Category::Web]
            .into_iter()
            .map(|value| CategoryChoice {
                value,
                label: value.label(),
            })
            .collect(),
        challenges: &CHALLENGES,
        budgets: BudgetBracket::all(),
        timelines: Timeline::ALL
            .into_iter()
            .map(|value| TimelineChoice {
                value,
                label: value.choice_label(),
            })
            .collect(),
        segments: &SEGMENTS,
        delivery_methods: &DELIVERY_METHODS,
        meeting_choices: &MEETING_CHOICES,
        branding_choices: &HAS_BRANDING_CHOICES,
        suggested_budgets: state
            .catalog
            .services()
            .iter()
            .map(|service| SuggestedBudget {
                service_id: service.id.clone(),
                budget: BudgetBracket::suggested_for(service.base_price).id,
            })
            .collect(),
    })
}
