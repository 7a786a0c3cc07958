//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod product;
pub mod search;
pub mod shipping;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use vitrine_commerce::search::SelectedValue;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category name or slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Search page query string, e.g. "q=iphone&categoria=seminovos".
    #[arg(long)]
    pub url: Option<String>,

    /// Sort order: relevance, price_asc or price_desc.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Model filter (repeatable), e.g. "IPHONE 13".
    #[arg(long = "model")]
    pub models: Vec<String>,

    /// Condition filter (repeatable).
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Capacity filter (repeatable), e.g. "128GB".
    #[arg(long = "capacity")]
    pub capacities: Vec<String>,

    /// Color filter (repeatable).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Price band index 0-3 (repeatable).
    #[arg(long = "price-band")]
    pub price_bands: Vec<usize>,

    /// Catalog file (default: from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Maximum number of rows to print.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// Facet values to toggle on, in facet order.
    pub fn selected_values(&self) -> Vec<SelectedValue> {
        let text = |values: &[String], make: fn(String) -> SelectedValue| {
            values.iter().cloned().map(make).collect::<Vec<_>>()
        };

        let mut selected = text(&self.models, SelectedValue::Model);
        selected.extend(text(&self.conditions, SelectedValue::Condition));
        selected.extend(text(&self.capacities, SelectedValue::Capacity));
        selected.extend(text(&self.colors, SelectedValue::Color));
        selected.extend(self.price_bands.iter().copied().map(SelectedValue::PriceBand));
        selected
    }
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Catalog file (default: from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Only list models containing this text.
    #[arg(long)]
    pub model_search: Option<String>,

    /// Also list the home-page condition sections.
    #[arg(long)]
    pub sections: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Catalog file (default: from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Variations file for this product.
    #[arg(long)]
    pub variations: Option<String>,

    /// Color to select.
    #[arg(long)]
    pub color: Option<String>,

    /// Capacity to select.
    #[arg(long)]
    pub capacity: Option<String>,

    /// Quantity to add to the cart.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Build the cart line for the selection.
    #[arg(long)]
    pub add_to_cart: bool,
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Postal code (CEP), with or without punctuation.
    pub cep: String,

    /// Count delivery days from this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub from: Option<NaiveDate>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog file the config should point at.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
