use clap::Subcommand;
use colored::*;
use skz_core::{format_short_date, truncate, ProposalStatus};
use skz_storage::{ListQuery, SortField, SortOrder};

use skz_cli::{open_storage, Config};

use super::new_table;

#[derive(Subcommand)]
pub enum ProposalsCommands {
    /// List proposals, newest first
    List {
        /// Only this status (SENT, VIEWED, ACCEPTED, ...)
        #[arg(long)]
        status: Option<ProposalStatus>,
        /// Match client name, email, company or proposal number
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Totals per status
    Stats,
}

pub async fn handle_proposals_command(
    command: ProposalsCommands,
    config: &Config,
) -> anyhow::Result<()> {
    match command {
        ProposalsCommands::List {
            status,
            search,
            limit,
        } => list_proposals(config, status, search, limit).await,
        ProposalsCommands::Stats => print_stats(config).await,
    }
}

async fn list_proposals(
    config: &Config,
    status: Option<ProposalStatus>,
    search: Option<String>,
    limit: i64,
) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;
    let query = ListQuery {
        status,
        search,
        sort_by: SortField::CreatedAt,
        sort_order: SortOrder::Desc,
        offset: 0,
        limit: limit.clamp(1, 500),
    };
    let (proposals, total) = storage.list(&query).await?;

    if proposals.is_empty() {
        println!("{}", "No proposals found".yellow());
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["Número", "Cliente", "Serviço", "Status", "Valor", "Views", "Criada"]);
    for proposal in &proposals {
        table.add_row(vec![
            proposal.proposal_number.clone(),
            truncate(&proposal.client_name, 25),
            proposal.main_service.clone(),
            proposal.status.label().to_string(),
            proposal.recommended_price.format_brl(),
            proposal.view_count.to_string(),
            format_short_date(proposal.created_at),
        ]);
    }

    println!("{}", table);
    println!(
        "Showing {} of {} proposals",
        proposals.len().to_string().cyan(),
        total.to_string().cyan()
    );
    Ok(())
}

async fn print_stats(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;
    let counts = storage.status_counts().await?;

    let mut table = new_table();
    table.set_header(vec!["Status", "Propostas"]);
    for status in ProposalStatus::ALL {
        table.add_row(vec![status.label().to_string(), counts.get(status).to_string()]);
    }
    println!("{}", table);
    println!("Total: {}", counts.total.to_string().cyan());
    Ok(())
}
