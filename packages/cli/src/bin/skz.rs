use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::catalog::CatalogArgs;
use cli::proposals::ProposalsCommands;
use cli::recommend::RecommendArgs;
use cli::render::RenderArgs;
use skz_cli::Config;

#[derive(Parser)]
#[command(name = "skz")]
#[command(about = "Skyz Design BR - commercial proposal service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides SKZ_API_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the service catalog
    Catalog(CatalogArgs),
    /// Run the recommendation engine without storing anything
    Recommend(RecommendArgs),
    /// Inspect stored proposals
    #[command(subcommand)]
    Proposals(ProposalsCommands),
    /// Write a stored proposal to a PDF, DOCX or HTML file
    Render(RenderArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    skz_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            skz_cli::run_server(config).await
        }
        Commands::Catalog(args) => cli::catalog::print_catalog(args),
        Commands::Recommend(args) => cli::recommend::run(args),
        Commands::Proposals(command) => {
            let config = Config::from_env()?;
            cli::proposals::handle_proposals_command(command, &config).await
        }
        Commands::Render(args) => {
            let config = Config::from_env()?;
            cli::render::run(args, &config).await
        }
    }
}
