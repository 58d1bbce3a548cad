use clap::Args;
use colored::*;
use skz_catalog::ServiceCatalog;
use skz_core::{PackageRecommendation, Timeline};
use skz_recommend::{RecommendationEngine, RecommendationInput};

use super::new_table;

#[derive(Args)]
pub struct RecommendArgs {
    /// Service id, e.g. landing_page
    pub service: String,
    /// Option id within the service
    #[arg(long)]
    pub option: Option<String>,
    /// Challenge ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub challenges: Vec<String>,
    /// urgente, normal or flexivel
    #[arg(long, default_value = "normal")]
    pub timeline: Timeline,
    /// Budget bracket id, e.g. 1000_2000
    #[arg(long)]
    pub budget: Option<String>,
    /// Print the raw JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

fn package_rows(title: &str, packages: &[PackageRecommendation]) {
    if packages.is_empty() {
        return;
    }
    println!("{}", title.cyan().bold());
    let mut table = new_table();
    table.set_header(vec!["ID", "Pacote", "Preço", "De", "Desconto", "Selo"]);
    for package in packages {
        table.add_row(vec![
            package.id.clone(),
            package.name.clone(),
            package.price.format_brl(),
            package.original_price.map(|p| p.format_brl()).unwrap_or_default(),
            package
                .discount_percent
                .map(|d| format!("{}%", d))
                .unwrap_or_default(),
            package.tag.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
}

pub fn run(args: RecommendArgs) -> anyhow::Result<()> {
    let catalog = ServiceCatalog::standard();
    let input = RecommendationInput {
        service: args.service,
        service_option: args.option,
        challenges: args.challenges,
        timeline: args.timeline,
        budget: args.budget,
    };
    let result = RecommendationEngine::new(&catalog).recommend(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    package_rows("⭐ Recomendado", std::slice::from_ref(&result.recommended));
    package_rows("Alternativas", &result.alternatives);
    package_rows("Combos", &result.combos);

    if result.savings.total.centavos() > 0 {
        println!(
            "Economia com combos: {} ({}%)",
            result.savings.total.format_brl().green(),
            result.savings.percentage
        );
    }
    Ok(())
}
