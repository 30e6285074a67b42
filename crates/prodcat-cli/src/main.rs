mod scrape_cmd;
mod sites_cmd;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "prodcat-cli")]
#[command(about = "Product catalog scraping and normalization pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a configured site and write staged JSON artifacts
    Scrape {
        /// Site profile key (defaults to the configured default site)
        #[arg(long)]
        site: Option<String>,

        /// Custom URL to scrape (required when --site custom)
        #[arg(long)]
        url: Option<String>,

        /// Maximum number of products to collect
        #[arg(long, default_value_t = 100)]
        max_products: usize,
    },
    /// List configured, enabled site profiles
    Sites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = prodcat_core::load_app_config()?;

    match cli.command {
        Commands::Scrape {
            site,
            url,
            max_products,
        } => scrape_cmd::run(&config, site, url, max_products).await,
        Commands::Sites => sites_cmd::run(&config),
    }
}
