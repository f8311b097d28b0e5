use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod sub_commands;

/// Simple CLI application to interact with a CloudRetail storefront
#[derive(Parser)]
#[command(name = "cloudretail-tool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products in the built-in catalog
    Products,
    /// Submit a purchase for a product
    Buy(sub_commands::buy::BuySubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let hyper_filter = "hyper=warn";

    let env_filter = EnvFilter::new(format!("{},{}", default_filter, hyper_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match &args.command {
        Commands::Products => sub_commands::products::products(),
        Commands::Buy(sub_command_args) => sub_commands::buy::buy(sub_command_args).await,
    }
}
