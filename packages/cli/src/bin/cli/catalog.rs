use clap::Args;
use colored::*;
use skz_catalog::ServiceCatalog;
use skz_core::{truncate, Category};

use super::new_table;

#[derive(Args)]
pub struct CatalogArgs {
    /// Only show one category (design or web)
    #[arg(long)]
    pub category: Option<Category>,
    /// Also list the options of each service
    #[arg(long)]
    pub options: bool,
}

pub fn print_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = ServiceCatalog::standard();
    let services = match args.category {
        Some(category) => catalog.get_services_by_category(category),
        None => catalog.services().iter().collect(),
    };

    println!("{}", "📋 Skyz Design BR - Catálogo".blue().bold());
    println!();

    let mut table = new_table();
    table.set_header(vec!["ID", "Serviço", "Categoria", "A partir de", "Prazo", "Opções"]);

    for service in &services {
        table.add_row(vec![
            service.id.clone(),
            truncate(&service.name, 40),
            service.category.label().to_string(),
            service.base_price.format_brl(),
            service.delivery_time.clone(),
            service.options.len().to_string(),
        ]);
    }
    println!("{}", table);

    if args.options {
        for service in services.iter().filter(|s| !s.options.is_empty()) {
            println!();
            println!("{}", service.name.cyan().bold());
            let mut options = new_table();
            options.set_header(vec!["ID", "Opção", "Preço", "Selo"]);
            for option in &service.options {
                options.add_row(vec![
                    option.id.clone(),
                    truncate(&option.name, 40),
                    option.price.format_brl(),
                    option.badge.clone().unwrap_or_default(),
                ]);
            }
            println!("{}", options);
        }
    }

    println!("Total: {} serviços", services.len().to_string().cyan());
    Ok(())
}
