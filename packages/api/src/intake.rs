// ABOUTME: Intake form payload and its field-level validation
// ABOUTME: Turns a raw submission into typed proposal data ready for the engine

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use skz_catalog::intake::is_known;
use skz_catalog::{
    BudgetBracket, ServiceCatalog, DELIVERY_METHODS, HAS_BRANDING_CHOICES, MEETING_CHOICES,
    SEGMENTS,
};
use skz_core::{is_valid_email, Category, NewProposal, Recommendation, Timeline};
use skz_recommend::RecommendationInput;

use crate::error::FieldErrors;

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;
const MAX_COMPANY_LENGTH: usize = 100;
const MAX_OBSERVATIONS_LENGTH: usize = 2000;
const MIN_PHONE_LENGTH: usize = 10;
const MAX_PHONE_LENGTH: usize = 20;

/// Steps of an intake form, each listing the fields it owns
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeStep {
    pub number: u8,
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

const OPTIMIZED_STEPS: [IntakeStep; 3] = [
    IntakeStep {
        number: 1,
        title: "Serviço",
        fields: &["category", "service", "serviceOption", "timeline", "budget"],
    },
    IntakeStep {
        number: 2,
        title: "Seu Negócio",
        fields: &[
            "clientName",
            "clientEmail",
            "clientPhone",
            "clientCompany",
            "clientSegment",
            "challenges",
            "hasBranding",
        ],
    },
    IntakeStep {
        number: 3,
        title: "Preferências",
        fields: &[
            "deliveryMethod",
            "wantsMeeting",
            "observations",
            "sendProposalByEmail",
            "sendProposalByWhatsApp",
        ],
    },
];

/// Intake form generations. Only the three-step form is accepted.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntakeFormVersion {
    #[default]
    Optimized,
}

impl IntakeFormVersion {
    pub fn steps(&self) -> &'static [IntakeStep] {
        match self {
            IntakeFormVersion::Optimized => &OPTIMIZED_STEPS,
        }
    }

    /// Step that owns a field, used to send the client back to the right page
    pub fn step_of(&self, field: &str) -> Option<u8> {
        self.steps()
            .iter()
            .find(|step| step.fields.contains(&field))
            .map(|step| step.number)
    }

    /// Earliest step owning one of the failed fields
    pub fn first_failing_step(&self, errors: &FieldErrors) -> Option<u8> {
        errors.keys().filter_map(|field| self.step_of(field)).min()
    }

    pub fn validate(
        &self,
        request: &CreateProposalRequest,
        catalog: &ServiceCatalog,
    ) -> Result<ValidIntake, FieldErrors> {
        match self {
            IntakeFormVersion::Optimized => validate_optimized(request, catalog),
        }
    }
}

/// Raw body of `POST /api/proposals/create`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    // Step 1
    pub category: Option<String>,
    pub service: Option<String>,
    pub service_option: Option<String>,
    pub timeline: Option<String>,
    pub budget: Option<String>,

    // Step 2
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_segment: Option<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    pub has_branding: Option<String>,

    // Step 3
    #[serde(default)]
    pub delivery_method: Vec<String>,
    pub wants_meeting: Option<String>,
    pub observations: Option<String>,
    pub send_proposal_by_email: Option<bool>,
    #[serde(rename = "sendProposalByWhatsApp")]
    pub send_proposal_by_whatsapp: Option<bool>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidIntake {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_segment: Option<String>,
    pub category: Category,
    pub service: String,
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
}

impl ValidIntake {
    pub fn recommendation_input(&self) -> RecommendationInput {
        RecommendationInput {
            service: self.service.clone(),
            service_option: self.service_option.clone(),
            challenges: self.challenges.clone(),
            timeline: self.timeline,
            budget: self.budget.clone(),
        }
    }

    pub fn into_new_proposal(self, recommendation: Recommendation) -> NewProposal {
        NewProposal {
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            client_company: self.client_company,
            client_segment: self.client_segment,
            category: self.category,
            main_service: self.service,
            service_option: self.service_option,
            challenges: self.challenges,
            timeline: self.timeline,
            budget: self.budget,
            has_branding: self.has_branding,
            delivery_method: self.delivery_method,
            wants_meeting: self.wants_meeting,
            observations: self.observations,
            send_by_email: self.send_by_email,
            send_by_whatsapp: self.send_by_whatsapp,
            recommendation,
        }
    }
}

static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\d\s()+-]+$").ok());

fn is_valid_phone(phone: &str) -> bool {
    let length = phone.chars().count();
    (MIN_PHONE_LENGTH..=MAX_PHONE_LENGTH).contains(&length)
        && PHONE_PATTERN.as_ref().is_some_and(|re| re.is_match(phone))
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn dedup(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn validate_optimized(
    request: &CreateProposalRequest,
    catalog: &ServiceCatalog,
) -> Result<ValidIntake, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut fail = |field: &str, message: &str| {
        errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    };

    // Step 1: service
    let service_id = clean(&request.service);
    let service = service_id.as_deref().and_then(|id| catalog.get_service_by_id(id));
    match (&service_id, service) {
        (None, _) => fail("service", "Selecione um serviço"),
        (Some(_), None) => fail("service", "Serviço não encontrado"),
        _ => {}
    }

    let requested_category = clean(&request.category);
    let category = match (requested_category.as_deref(), service) {
        (Some(raw), Some(service)) => match raw.parse::<Category>() {
            Ok(category) if category == service.category => Some(category),
            Ok(_) => {
                fail("category", "Categoria não corresponde ao serviço escolhido");
                None
            }
            Err(_) => {
                fail("category", "Categoria inválida");
                None
            }
        },
        (Some(raw), None) => {
            if raw.parse::<Category>().is_err() {
                fail("category", "Categoria inválida");
            }
            None
        }
        (None, Some(service)) => Some(service.category),
        (None, None) => None,
    };

    let service_option = clean(&request.service_option);
    if let (Some(option), Some(service)) = (&service_option, service) {
        if service.option(option).is_none() {
            fail("serviceOption", "Opção não pertence ao serviço escolhido");
        }
    }

    let timeline = match clean(&request.timeline) {
        None => {
            fail("timeline", "Selecione o prazo desejado");
            None
        }
        Some(raw) => match raw.parse::<Timeline>() {
            Ok(timeline) => Some(timeline),
            Err(_) => {
                fail("timeline", "Prazo inválido");
                None
            }
        },
    };

    let budget = clean(&request.budget);
    if let Some(id) = &budget {
        if BudgetBracket::find(id).is_none() {
            fail("budget", "Faixa de investimento inválida");
        }
    }

    // Step 2: business
    let client_name = clean(&request.client_name);
    match &client_name {
        None => fail("clientName", "Informe seu nome"),
        Some(name) if name.chars().count() < MIN_NAME_LENGTH => {
            fail("clientName", "Nome deve ter pelo menos 2 caracteres")
        }
        Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
            fail("clientName", "Nome muito longo")
        }
        _ => {}
    }

    let client_email = clean(&request.client_email);
    match &client_email {
        None => fail("clientEmail", "Informe seu e-mail"),
        Some(email) if !is_valid_email(email) => fail("clientEmail", "E-mail inválido"),
        _ => {}
    }

    let client_phone = clean(&request.client_phone);
    if client_phone.as_deref().is_some_and(|phone| !is_valid_phone(phone)) {
        fail("clientPhone", "Telefone inválido");
    }

    let client_company = clean(&request.client_company);
    if client_company
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_COMPANY_LENGTH)
    {
        fail("clientCompany", "Nome da empresa muito longo");
    }

    let client_segment = clean(&request.client_segment);
    if let Some(segment) = &client_segment {
        if !is_known(&SEGMENTS, segment) {
            fail("clientSegment", "Segmento inválido");
        }
    }

    let has_branding = clean(&request.has_branding);
    if let Some(value) = &has_branding {
        if !is_known(&HAS_BRANDING_CHOICES, value) {
            fail("hasBranding", "Opção de identidade visual inválida");
        }
    }

    // Step 3: preferences
    let delivery_method = dedup(&request.delivery_method);
    if delivery_method
        .iter()
        .any(|method| !is_known(&DELIVERY_METHODS, method))
    {
        fail("deliveryMethod", "Forma de entrega inválida");
    }

    let wants_meeting = match clean(&request.wants_meeting) {
        None => {
            fail("wantsMeeting", "Informe se deseja agendar uma reunião");
            false
        }
        Some(answer) if !is_known(&MEETING_CHOICES, &answer) => {
            fail("wantsMeeting", "Resposta inválida");
            false
        }
        Some(answer) => answer == "sim",
    };

    let observations = clean(&request.observations);
    if observations
        .as_ref()
        .is_some_and(|o| o.chars().count() > MAX_OBSERVATIONS_LENGTH)
    {
        fail("observations", "Observações muito longas");
    }

    match (service, category, timeline, client_name, client_email) {
        (Some(service), Some(category), Some(timeline), Some(client_name), Some(client_email))
            if errors.is_empty() =>
        {
            Ok(ValidIntake {
                client_name,
                client_email,
                client_phone,
                client_company,
                client_segment,
                category,
                service: service.id.clone(),
                service_option,
                challenges: dedup(&request.challenges),
                timeline,
                budget,
                has_branding,
                delivery_method,
                wants_meeting,
                observations,
                send_by_email: request.send_proposal_by_email.unwrap_or(true),
                send_by_whatsapp: request.send_proposal_by_whatsapp.unwrap_or(false),
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn valid_request() -> CreateProposalRequest {
        CreateProposalRequest {
            category: Some("web".to_string()),
            service: Some("landing_page".to_string()),
            service_option: Some("landing_pro".to_string()),
            timeline: Some("normal".to_string()),
            budget: Some("1000_2000".to_string()),
            client_name: Some("  Ana Souza ".to_string()),
            client_email: Some("ana@example.com".to_string()),
            client_phone: Some("(11) 98888-7777".to_string()),
            client_company: Some("Padaria Pão Quente".to_string()),
            client_segment: Some("restaurante".to_string()),
            challenges: vec!["sales".to_string(), "conversion".to_string(), "sales".to_string()],
            has_branding: Some("parcial".to_string()),
            delivery_method: vec!["email".to_string()],
            wants_meeting: Some("sim".to_string()),
            observations: None,
            send_proposal_by_email: None,
            send_proposal_by_whatsapp: None,
        }
    }

    fn errors_for(request: CreateProposalRequest) -> FieldErrors {
        let catalog = ServiceCatalog::standard();
        IntakeFormVersion::Optimized
            .validate(&request, &catalog)
            .unwrap_err()
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let catalog = ServiceCatalog::standard();
        let intake = IntakeFormVersion::Optimized
            .validate(&valid_request(), &catalog)
            .unwrap();

        assert_eq!(intake.client_name, "Ana Souza");
        assert_eq!(intake.category, Category::Web);
        assert_eq!(intake.challenges, vec!["sales".to_string(), "conversion".to_string()]);
        assert!(intake.wants_meeting);
        assert!(intake.send_by_email);
        assert!(!intake.send_by_whatsapp);

        let input = intake.recommendation_input();
        assert_eq!(input.service, "landing_page");
        assert_eq!(input.budget.as_deref(), Some("1000_2000"));
    }

    #[test]
    fn test_category_is_derived_when_missing() {
        let catalog = ServiceCatalog::standard();
        let mut request = valid_request();
        request.category = None;
        let intake = IntakeFormVersion::Optimized.validate(&request, &catalog).unwrap();
        assert_eq!(intake.category, Category::Web);
    }

    #[test]
    fn test_empty_submission_reports_every_required_field() {
        let errors = errors_for(CreateProposalRequest::default());
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["clientEmail", "clientName", "service", "timeline", "wantsMeeting"]
        );
    }

    #[rstest]
    #[case::short_name("clientName", |r: &mut CreateProposalRequest| r.client_name = Some("A".into()))]
    #[case::bad_email("clientEmail", |r: &mut CreateProposalRequest| r.client_email = Some("ana@".into()))]
    #[case::unknown_service("service", |r: &mut CreateProposalRequest| r.service = Some("logo".into()))]
    #[case::foreign_option("serviceOption", |r: &mut CreateProposalRequest| r.service_option = Some("10".into()))]
    #[case::category_mismatch("category", |r: &mut CreateProposalRequest| r.category = Some("design".into()))]
    #[case::bad_timeline("timeline", |r: &mut CreateProposalRequest| r.timeline = Some("ontem".into()))]
    #[case::bad_budget("budget", |r: &mut CreateProposalRequest| r.budget = Some("999".into()))]
    #[case::bad_phone("clientPhone", |r: &mut CreateProposalRequest| r.client_phone = Some("abc".into()))]
    #[case::bad_segment("clientSegment", |r: &mut CreateProposalRequest| r.client_segment = Some("x".into()))]
    #[case::bad_delivery("deliveryMethod", |r: &mut CreateProposalRequest| r.delivery_method = vec!["fax".into()])]
    #[case::bad_meeting("wantsMeeting", |r: &mut CreateProposalRequest| r.wants_meeting = Some("quem sabe".into()))]
    fn test_single_field_errors(
        #[case] field: &str,
        #[case] mutate: fn(&mut CreateProposalRequest),
    ) {
        let mut request = valid_request();
        mutate(&mut request);
        let errors = errors_for(request);
        assert_eq!(errors.len(), 1, "{:?}", errors);
        assert!(errors.contains_key(field), "{:?}", errors);
    }

    #[test]
    fn test_unknown_challenges_are_kept_for_the_engine() {
        let catalog = ServiceCatalog::standard();
        let mut request = valid_request();
        request.challenges = vec!["world_domination".to_string()];
        let intake = IntakeFormVersion::Optimized.validate(&request, &catalog).unwrap();
        assert_eq!(intake.challenges, vec!["world_domination".to_string()]);
    }

    #[test]
    fn test_step_lookup() {
        let form = IntakeFormVersion::Optimized;
        assert_eq!(form.steps().len(), 3);
        assert_eq!(form.step_of("budget"), Some(1));
        assert_eq!(form.step_of("clientEmail"), Some(2));
        assert_eq!(form.step_of("wantsMeeting"), Some(3));
        assert_eq!(form.step_of("nope"), None);
    }

    #[test]
    fn test_first_failing_step_points_at_earliest_page() {
        let form = IntakeFormVersion::Optimized;
        let mut request = valid_request();
        request.client_email = Some("ana.example.com".to_string());
        request.wants_meeting = None;
        assert_eq!(form.first_failing_step(&errors_for(request.clone())), Some(2));

        request.timeline = Some("ontem".to_string());
        assert_eq!(form.first_failing_step(&errors_for(request)), Some(1));
    }
}
