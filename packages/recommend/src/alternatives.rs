use skz_catalog::{BudgetBracket, ServiceCatalog, ServiceCatalogEntry};
use skz_core::PackageRecommendation;

const MAX_ALTERNATIVES: usize = 3;
const SIBLING_CANDIDATES: usize = 2;

/// Other options of the chosen service, then up to two sibling services of the
/// same category, all inside the budget window, capped at three.
pub(crate) fn build(
    catalog: &ServiceCatalog,
    service: &ServiceCatalogEntry,
    current_option: Option<&str>,
    bracket: &BudgetBracket,
) -> Vec<PackageRecommendation> {
    let mut alternatives = Vec::new();

    if service.options.len() > 1 {
        let reference_price = service.options[0].price;
        for option in &service.options {
            if Some(option.id.as_str()) == current_option {
                continue;
            }
            if !bracket.admits_alternative(option.price) {
                continue;
            }
            let tag = if option.price < reference_price {
                "Econômico"
            } else {
                "Premium"
            };
            alternatives.push(PackageRecommendation {
                id: format!("{}-{}", service.id, option.id),
                name: format!("{} - {}", service.name, option.name),
                price: option.price,
                original_price: None,
                discount_percent: None,
                description: option.description.clone(),
                includes: service.includes.clone(),
                benefits: service.benefits.clone(),
                delivery_time: service.delivery_time.clone(),
                tag: Some(tag.to_string()),
                is_recommended: false,
            });
        }
    }

    // Siblings are picked in catalog order before the budget filter applies
    let siblings = catalog
        .get_services_by_category(service.category)
        .into_iter()
        .filter(|s| s.id != service.id)
        .take(SIBLING_CANDIDATES);

    for sibling in siblings {
        if !bracket.admits_alternative(sibling.base_price) {
            continue;
        }
        alternatives.push(PackageRecommendation {
            id: sibling.id.clone(),
            name: sibling.name.clone(),
            price: sibling.base_price,
            original_price: None,
            discount_percent: None,
            description: format!("Alternativa: {}", sibling.name),
            includes: sibling.includes.clone(),
            benefits: sibling.benefits.clone(),
            delivery_time: sibling.delivery_time.clone(),
            tag: Some("Alternativa".to_string()),
            is_recommended: false,
        });
    }

    alternatives.truncate(MAX_ALTERNATIVES);
    alternatives
}
