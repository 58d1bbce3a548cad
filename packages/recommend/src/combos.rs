use skz_catalog::{complementary_services, BudgetBracket, ServiceCatalog, ServiceCatalogEntry};
use skz_core::{Money, PackageRecommendation};

const ESSENTIAL_PERCENT: i64 = 90;
const COMPLETE_PERCENT: i64 = 85;

/// Complementary service ids suggested by the client's challenges, in
/// first-seen order, without the main service. Ids are kept even when the
/// catalog does not know them, so positions stay stable.
fn candidates(main: &ServiceCatalogEntry, challenges: &[String]) -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for challenge in challenges {
        for &id in complementary_services(challenge) {
            if id != main.id && !seen.contains(&id) {
                seen.push(id);
            }
        }
    }
    seen
}

fn take_includes(parts: &[&ServiceCatalogEntry], per_service: usize) -> Vec<String> {
    parts
        .iter()
        .flat_map(|s| s.includes.iter().take(per_service).cloned())
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn combo(
    id: String,
    name: &str,
    parts: &[&ServiceCatalogEntry],
    percent: i64,
) -> PackageRecommendation {
    let original_price: Money = parts.iter().map(|s| s.base_price).sum();
    let price = original_price.percent_of(percent);
    let description = parts
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ");

    PackageRecommendation {
        id,
        name: name.to_string(),
        price,
        original_price: Some(original_price),
        discount_percent: Some(original_price.discount_percent_to(price)),
        description,
        includes: Vec::new(),
        benefits: Vec::new(),
        delivery_time: String::new(),
        tag: None,
        is_recommended: false,
    }
}

/// Up to two discounted bundles: main + first candidate (10% off), and
/// main + first two candidates (15% off), each gated by the budget ceiling.
/// A bundle is skipped when any of its candidates is missing from the catalog.
pub(crate) fn build(
    catalog: &ServiceCatalog,
    main: &ServiceCatalogEntry,
    challenges: &[String],
    bracket: &BudgetBracket,
) -> Vec<PackageRecommendation> {
    let candidates = candidates(main, challenges);
    let lookup = |position: usize| {
        candidates
            .get(position)
            .and_then(|id| catalog.get_service_by_id(id))
    };
    let mut combos = Vec::new();

    if let Some(first) = lookup(0) {
        let parts = [main, first];
        let mut essential = combo(
            format!("combo-{}-{}", main.id, first.id),
            "Combo Essencial",
            &parts,
            ESSENTIAL_PERCENT,
        );
        if bracket.admits_essential_combo(essential.price) {
            essential.includes = take_includes(&parts, 3);
            essential.benefits = strings(&[
                "Economia de 10% no pacote",
                "Estratégia integrada",
                "Prioridade no atendimento",
            ]);
            essential.delivery_time = "Combinamos o melhor prazo".to_string();
            essential.tag = Some("Combo Popular".to_string());
            combos.push(essential);
        }
    }

    if let (Some(first), Some(second)) = (lookup(0), lookup(1)) {
        let parts = [main, first, second];
        let mut complete = combo(
            format!("combo-full-{}", main.id),
            "Combo Completo",
            &parts,
            COMPLETE_PERCENT,
        );
        if bracket.admits_complete_combo(complete.price) {
            complete.includes = take_includes(&parts, 2);
            complete.benefits = strings(&[
                "Economia de 15% no pacote",
                "Solução completa para seu negócio",
                "Gerente de projeto dedicado",
                "Suporte prioritário 30 dias",
            ]);
            complete.delivery_time = "Cronograma personalizado".to_string();
            complete.tag = Some("Melhor Custo-Benefício".to_string());
            complete.is_recommended = true;
            combos.push(complete);
        }
    }

    combos
}
