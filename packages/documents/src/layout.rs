// ABOUTME: Backend-neutral proposal layout: an ordered list of typed blocks
// ABOUTME: Section order, labels, and truncation rules live here and nowhere else

use chrono::{DateTime, Utc};
use skz_catalog::{challenge_label, intake::segment_label, BudgetBracket, CompanyProfile, ServiceCatalog};
use skz_core::{format_long_date, format_short_date, PackageRecommendation, ProposalRecord};

use crate::error::DocumentResult;

const MAX_DIFFERENTIATORS: usize = 6;
const MAX_TERMS: usize = 4;
const MAX_COMBO_INCLUDES: usize = 6;
const MAX_COMBO_BENEFITS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Cover {
        brand: String,
        title: String,
        number_line: String,
        client_line: String,
        created_label: String,
        created: String,
        valid_label: String,
        valid_until: String,
        expired: bool,
    },
    Heading {
        number: usize,
        title: String,
    },
    KeyValueTable(Vec<(String, String)>),
    Paragraph(String),
    BulletList {
        title: Option<String>,
        items: Vec<String>,
    },
    NumberedList(Vec<String>),
    /// Bold title followed by a body paragraph, one pair per entry
    DefinitionList(Vec<(String, String)>),
    PackageHighlight {
        badge: String,
        name: String,
        price: String,
        description: String,
        delivery: String,
        includes: Vec<String>,
        benefits: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        /// Relative column widths, summing to 1.0
        widths: Vec<f32>,
        rows: Vec<Vec<String>>,
    },
    ComboCard {
        tag: Option<String>,
        name: String,
        description: String,
        price: String,
        original_price: Option<String>,
        discount: Option<String>,
        includes: Vec<String>,
        benefits: Vec<String>,
    },
    ContactCard {
        title: String,
        lines: Vec<String>,
    },
    PageBreak,
}

/// Text printed at the bottom of every page. Backends append the page counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub company_line: String,
    pub proposal_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub proposal_number: String,
    pub author: String,
    pub blocks: Vec<Block>,
    pub footer: Footer,
    pub expired: bool,
}

impl DocumentLayout {
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { title, .. } => Some(title.as_str()),
            _ => None,
        })
    }
}

struct Sections {
    blocks: Vec<Block>,
    next_number: usize,
}

impl Sections {
    fn heading(&mut self, title: &str) {
        self.next_number += 1;
        self.blocks.push(Block::Heading {
            number: self.next_number,
            title: title.to_string(),
        });
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn page_break(&mut self) {
        if !matches!(self.blocks.last(), Some(Block::PageBreak) | None) {
            self.blocks.push(Block::PageBreak);
        }
    }
}

fn kv(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

fn package_type(pkg: &PackageRecommendation) -> String {
    pkg.tag.clone().unwrap_or_default()
}

/// Builds the proposal layout. Fails only when a stored package blob is malformed.
pub fn build(
    record: &ProposalRecord,
    catalog: &ServiceCatalog,
    company: &CompanyProfile,
    now: DateTime<Utc>,
) -> DocumentResult<DocumentLayout> {
    let packages = record.packages()?;
    let expired = record.is_expired(now);

    let client_line = match record.client_company.as_deref().filter(|c| !c.is_empty()) {
        Some(company_name) => format!("{} - {}", record.client_name, company_name),
        None => record.client_name.clone(),
    };

    let mut sections = Sections {
        blocks: Vec::new(),
        next_number: 0,
    };

    sections.push(Block::Cover {
        brand: company.name.to_uppercase(),
        title: "PROPOSTA COMERCIAL".to_string(),
        number_line: format!("N. {}", record.proposal_number),
        client_line,
        created_label: "Data de Criação".to_string(),
        created: format_long_date(record.created_at),
        valid_label: "Válida Até".to_string(),
        valid_until: format_long_date(record.valid_until),
        expired,
    });
    sections.page_break();

    // Client
    sections.heading("DADOS DO CLIENTE");
    let mut client = vec![kv("Nome", record.client_name.clone()), kv("E-mail", record.client_email.clone())];
    if let Some(phone) = record.client_phone.as_deref().filter(|v| !v.is_empty()) {
        client.push(kv("Telefone", phone));
    }
    if let Some(company_name) = record.client_company.as_deref().filter(|v| !v.is_empty()) {
        client.push(kv("Empresa", company_name));
    }
    if let Some(segment) = record.client_segment.as_deref().filter(|v| !v.is_empty()) {
        client.push(kv("Segmento", segment_label(segment)));
    }
    sections.push(Block::KeyValueTable(client));

    // Service requested
    sections.heading("SERVIÇO SOLICITADO");
    let mut service_rows = vec![
        kv("Serviço", catalog.service_display_name(&record.main_service)),
        kv("Categoria", record.category.label()),
    ];
    if let Some(option) = record
        .service_option
        .as_deref()
        .and_then(|o| catalog.get_service_option(&record.main_service, o))
    {
        service_rows.push(kv("Opção", option.name.clone()));
    }
    service_rows.push(kv("Prazo", record.timeline.label()));
    if let Some(budget) = record.budget.as_deref().filter(|b| !b.is_empty()) {
        let label = BudgetBracket::find(budget)
            .map(|b| b.label.to_string())
            .unwrap_or_else(|| budget.to_string());
        service_rows.push(kv("Investimento previsto", label));
    }
    sections.push(Block::KeyValueTable(service_rows));
    if !record.challenges.is_empty() {
        sections.push(Block::BulletList {
            title: Some("Objetivos:".to_string()),
            items: record
                .challenges
                .iter()
                .map(|c| challenge_label(c).to_string())
                .collect(),
        });
    }
    if let Some(notes) = record.observations.as_deref().filter(|o| !o.trim().is_empty()) {
        sections.push(Block::Paragraph(format!("Observações: {}", notes.trim())));
    }
    sections.page_break();

    // Packages
    sections.heading("PACOTE RECOMENDADO");
    let recommended = &packages.recommended;
    sections.push(Block::PackageHighlight {
        badge: recommended
            .tag
            .as_deref()
            .unwrap_or("Recomendado")
            .to_uppercase(),
        name: recommended.name.clone(),
        price: recommended.price.format_brl(),
        description: recommended.description.clone(),
        delivery: format!("Prazo: {}", recommended.delivery_time),
        includes: recommended.includes.clone(),
        benefits: recommended.benefits.clone(),
    });

    if !packages.alternatives.is_empty() {
        sections.heading("OUTRAS OPÇÕES");
        sections.push(Block::Table {
            headers: vec![
                "Pacote".to_string(),
                "Tipo".to_string(),
                "Investimento".to_string(),
                "Prazo".to_string(),
            ],
            widths: vec![0.42, 0.16, 0.18, 0.24],
            rows: packages
                .alternatives
                .iter()
                .map(|pkg| {
                    vec![
                        pkg.name.clone(),
                        package_type(pkg),
                        pkg.price.format_brl(),
                        pkg.delivery_time.clone(),
                    ]
                })
                .collect(),
        });
    }

    if !packages.combos.is_empty() {
        sections.heading("COMBOS ESPECIAIS");
        for combo in &packages.combos {
            sections.push(Block::ComboCard {
                tag: combo.tag.clone(),
                name: combo.name.clone(),
                description: combo.description.clone(),
                price: combo.price.format_brl(),
                original_price: combo.original_price.map(|p| format!("De {}", p.format_brl())),
                discount: combo.discount_percent.map(|d| format!("-{}%", d)),
                includes: combo.includes.iter().take(MAX_COMBO_INCLUDES).cloned().collect(),
                benefits: combo.benefits.iter().take(MAX_COMBO_BENEFITS).cloned().collect(),
            });
        }
    }
    sections.page_break();

    // Closing
    sections.heading("PRÓXIMOS PASSOS");
    sections.push(Block::NumberedList(company.next_steps.clone()));

    sections.heading("DIFERENCIAIS SKYZ DESIGN");
    sections.push(Block::Paragraph(company.about.clone()));
    sections.push(Block::DefinitionList(
        company
            .differentiators
            .iter()
            .take(MAX_DIFFERENTIATORS)
            .map(|d| (d.title.clone(), d.description.clone()))
            .collect(),
    ));
    sections.page_break();

    sections.heading("TERMOS E CONDIÇÕES");
    sections.push(Block::DefinitionList(
        company
            .terms
            .iter()
            .take(MAX_TERMS)
            .map(|t| (t.title.clone(), t.content.clone()))
            .collect(),
    ));

    sections.push(Block::ContactCard {
        title: "Vamos começar?".to_string(),
        lines: vec![
            format!("WhatsApp: {}  |  E-mail: {}", company.phone, company.email),
            format!("Instagram: {}  |  {}", company.instagram, company.website),
        ],
    });

    Ok(DocumentLayout {
        title: format!("Proposta Comercial {}", record.proposal_number),
        proposal_number: record.proposal_number.clone(),
        author: company.name.clone(),
        blocks: sections.blocks,
        footer: Footer {
            company_line: format!("{} - {} - {}", company.name, company.email, company.phone),
            proposal_line: format!(
                "Proposta {} - Válida até {}",
                record.proposal_number,
                format_short_date(record.valid_until)
            ),
        },
        expired,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone, Utc};
    use skz_catalog::ServiceCatalog;
    use skz_core::{Category, ProposalRecord, ProposalStatus, Timeline};
    use skz_recommend::{RecommendationEngine, RecommendationInput};

    pub fn record() -> ProposalRecord {
        let catalog = ServiceCatalog::standard();
        let recommendation = RecommendationEngine::new(&catalog)
            .recommend(&RecommendationInput {
                service: "landing_page".to_string(),
                service_option: Some("landing_pro".to_string()),
                challenges: vec!["sales".to_string(), "conversion".to_string()],
                timeline: Timeline::Normal,
                budget: Some("1000_2000".to_string()),
            })
            .unwrap();
        let created = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        ProposalRecord {
            id: "3f1c9a52-7d4e-4f0b-9a63-1c2d3e4f5a6b".to_string(),
            proposal_number: "SKZ-20261019-042".to_string(),
            client_name: "Mariana Costa".to_string(),
            client_email: "mariana@lojaaurora.com.br".to_string(),
            client_phone: Some("(11) 98888-7777".to_string()),
            client_company: Some("Loja Aurora".to_string()),
            client_segment: Some("ecommerce".to_string()),
            category: Category::Web,
            main_service: "landing_page".to_string(),
            service_option: Some("landing_pro".to_string()),
            challenges: vec!["sales".to_string(), "conversion".to_string()],
            timeline: Timeline::Normal,
            budget: Some("1000_2000".to_string()),
            has_branding: Some("parcial".to_string()),
            delivery_method: vec!["whatsapp".to_string()],
            wants_meeting: true,
            observations: Some("Lançamento em novembro".to_string()),
            send_by_email: true,
            send_by_whatsapp: false,
            recommended_package_json: serde_json::to_string(&recommendation.recommended).unwrap(),
            alternative_packages_json: serde_json::to_string(&recommendation.alternatives).unwrap(),
            combos_json: serde_json::to_string(&recommendation.combos).unwrap(),
            selected_package: None,
            status: ProposalStatus::Sent,
            view_count: 0,
            created_at: created,
            updated_at: created,
            valid_until: created + Duration::days(15),
            last_viewed_at: None,
            email_sent_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_order() {
        let record = fixtures::record();
        let layout = build(
            &record,
            &ServiceCatalog::standard(),
            &CompanyProfile::skyz(),
            record.created_at,
        )
        .unwrap();

        let headings: Vec<&str> = layout.headings().collect();
        assert_eq!(
            headings,
            vec![
                "DADOS DO CLIENTE",
                "SERVIÇO SOLICITADO",
                "PACOTE RECOMENDADO",
                "OUTRAS OPÇÕES",
                "COMBOS ESPECIAIS",
                "PRÓXIMOS PASSOS",
                "DIFERENCIAIS SKYZ DESIGN",
                "TERMOS E CONDIÇÕES",
            ]
        );
        assert!(matches!(layout.blocks.first(), Some(Block::Cover { .. })));
        assert!(matches!(layout.blocks.last(), Some(Block::ContactCard { .. })));
        assert!(!layout.expired);
        assert_eq!(
            layout.footer.proposal_line,
            "Proposta SKZ-20261019-042 - Válida até 03/11/2026"
        );
    }

    #[test]
    fn test_truncation_rules() {
        let record = fixtures::record();
        let layout = build(
            &record,
            &ServiceCatalog::standard(),
            &CompanyProfile::skyz(),
            record.created_at,
        )
        .unwrap();

        let definition_lists: Vec<usize> = layout
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::DefinitionList(items) => Some(items.len()),
                _ => None,
            })
            .collect();
        assert_eq!(definition_lists, vec![6, 4]);

        for block in &layout.blocks {
            if let Block::ComboCard { includes, benefits, discount, .. } = block {
                assert!(includes.len() <= 6);
                assert!(benefits.len() <= 3);
                assert_eq!(discount.as_deref(), Some("-10%"));
            }
        }
    }

    #[test]
    fn test_unknown_service_falls_back_to_raw_id() {
        let mut record = fixtures::record();
        record.main_service = "consultoria_marca".to_string();
        record.service_option = None;
        let layout = build(
            &record,
            &ServiceCatalog::standard(),
            &CompanyProfile::skyz(),
            record.created_at,
        )
        .unwrap();

        let service_row = layout.blocks.iter().find_map(|b| match b {
            Block::KeyValueTable(rows) => rows.iter().find(|(k, _)| k == "Serviço").cloned(),
            _ => None,
        });
        assert_eq!(
            service_row,
            Some(("Serviço".to_string(), "consultoria_marca".to_string()))
        );
    }

    #[test]
    fn test_expired_flag_and_malformed_blob() {
        let record = fixtures::record();
        let later = record.valid_until + Duration::days(1);
        let layout = build(&record, &ServiceCatalog::standard(), &CompanyProfile::skyz(), later).unwrap();
        assert!(layout.expired);

        let mut broken = fixtures::record();
        broken.combos_json = "[{\"id\":".to_string();
        let err = build(&broken, &ServiceCatalog::standard(), &CompanyProfile::skyz(), later);
        assert!(matches!(err, Err(crate::DocumentError::MalformedPackages(_))));
    }

    #[test]
    fn test_optional_sections_are_skipped() {
        let mut record = fixtures::record();
        record.alternative_packages_json = "[]".to_string();
        record.combos_json = "[]".to_string();
        record.challenges.clear();
        let layout = build(
            &record,
            &ServiceCatalog::standard(),
            &CompanyProfile::skyz(),
            record.created_at,
        )
        .unwrap();
        let headings: Vec<&str> = layout.headings().collect();
        assert!(!headings.contains(&"OUTRAS OPÇÕES"));
        assert!(!headings.contains(&"COMBOS ESPECIAIS"));
        // numbering stays contiguous
        let numbers: Vec<usize> = layout
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, (1..=numbers.len()).collect::<Vec<_>>());
    }
}
