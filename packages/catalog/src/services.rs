use serde::Serialize;
use skz_core::{Category, Money};

/// A priced variant of a service (package size, tier, ...)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOption {
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalogEntry {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub base_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub is_recurring: bool,
    pub delivery_time: String,
    pub includes: Vec<String>,
    pub benefits: Vec<String>,
    pub options: Vec<ServiceOption>,
}

impl ServiceCatalogEntry {
    pub fn option(&self, option_id: &str) -> Option<&ServiceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Read-only service catalog.
///
/// Entry order is significant: the engine picks sibling alternatives in
/// catalog order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceCatalogEntry>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceCatalogEntry>) -> Self {
        ServiceCatalog { services }
    }

    /// The Skyz Design BR price list
    pub fn standard() -> Self {
        ServiceCatalog::new(crate::standard::services())
    }

    pub fn services(&self) -> &[ServiceCatalogEntry] {
        &self.services
    }

    pub fn get_service_by_id(&self, id: &str) -> Option<&ServiceCatalogEntry> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn get_services_by_category(&self, category: Category) -> Vec<&ServiceCatalogEntry> {
        self.services
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    pub fn get_service_option(&self, service_id: &str, option_id: &str) -> Option<&ServiceOption> {
        self.get_service_by_id(service_id)
            .and_then(|s| s.option(option_id))
    }

    /// Service name, or the raw id when the service is not in the catalog
    pub fn service_display_name(&self, id: &str) -> String {
        self.get_service_by_id(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_by_id() {
        let catalog = ServiceCatalog::standard();
        let landing = catalog.get_service_by_id("landing_page").unwrap();
        assert_eq!(landing.name, "Landing Page / Página de Vendas");
        assert_eq!(landing.base_price, Money::from_reais(397));
        assert_eq!(landing.category, Category::Web);
        assert!(catalog.get_service_by_id("gestao_social_premium").is_none());
    }

    #[test]
    fn test_services_by_category_keep_catalog_order() {
        let catalog = ServiceCatalog::standard();
        let web: Vec<&str> = catalog
            .get_services_by_category(Category::Web)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(web, vec!["landing_page", "site_institucional", "sistema_saas"]);

        let design: Vec<&str> = catalog
            .get_services_by_category(Category::Design)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            design,
            vec!["criativos", "filmmaker", "edicao_reels", "edicao_videoaulas", "gestao_social"]
        );
    }

    #[test]
    fn test_option_lookup() {
        let catalog = ServiceCatalog::standard();
        let pro = catalog.get_service_option("landing_page", "landing_pro").unwrap();
        assert_eq!(pro.price, Money::from_reais(697));
        assert_eq!(pro.badge.as_deref(), Some("Mais popular"));

        let five = catalog.get_service_option("criativos", "5").unwrap();
        assert_eq!(five.price, Money::from_reais(260));
        assert_eq!(five.savings, Some(Money::from_reais(40)));

        assert!(catalog.get_service_option("landing_page", "5").is_none());
        assert!(catalog.get_service_option("nope", "landing_pro").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.service_display_name("sistema_saas"), "Sistema SaaS");
        assert_eq!(catalog.service_display_name("custom_service"), "custom_service");
    }

    #[test]
    fn test_every_service_has_content() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.services().len(), 8);
        for service in catalog.services() {
            assert!(!service.includes.is_empty(), "{} has no includes", service.id);
            assert!(!service.benefits.is_empty(), "{} has no benefits", service.id);
            assert!(!service.delivery_time.is_empty());
        }
    }
}
