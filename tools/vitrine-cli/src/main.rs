//! Vitrine CLI - Command line front end for the catalog search engine.
//!
//! Commands:
//! - `vitrine search` - Filter and sort a product catalog
//! - `vitrine facets` - Show the facet picker for a catalog
//! - `vitrine product` - Show a product page with variations
//! - `vitrine shipping` - Estimate delivery for a CEP
//! - `vitrine config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, FacetsArgs, ProductArgs, SearchArgs, ShippingArgs};

/// Vitrine CLI - Browse a refurbished smartphone catalog
#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog with facet filters
    Search(SearchArgs),

    /// Show available facets for the catalog
    Facets(FacetsArgs),

    /// Show a product page
    Product(ProductArgs),

    /// Estimate shipping for a postal code
    Shipping(ShippingArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.log, cli.verbose) {
        ctx.output.warn(&format!("{:#}", e));
    }
    tracing::debug!(config = ?ctx.config_file, "loaded configuration");

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Shipping(args) => commands::shipping::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
