//! Product record as served by the product API.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Read-only to this crate. Everything except `id` and `name` may be missing
/// from the payload, so optional text fields stay `Option` and numeric fields
/// default to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name, e.g. "iPhone 13 Pro Max 256GB Grafite".
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category display name.
    #[serde(default)]
    pub category: Option<String>,
    /// URL-friendly category slug.
    #[serde(default)]
    pub category_slug: Option<String>,
    /// Current price in reais.
    #[serde(default)]
    pub price: f64,
    /// Price before discount, in reais.
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    /// Image URLs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Raw condition code (e.g. "seminovo").
    #[serde(default)]
    pub condition: Option<String>,
    /// Human-readable condition (e.g. "Seminovo - Excelente").
    #[serde(default)]
    pub condition_label: Option<String>,
    #[serde(default)]
    pub condition_description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: i64,
    /// Number of interest-free installments offered.
    #[serde(default = "default_installments")]
    pub installments: u32,
}

fn default_installments() -> u32 {
    1
}

impl Product {
    /// Create a product with just an id, name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            installments: default_installments(),
            ..Default::default()
        }
    }

    /// Condition text shown to shoppers: the label when present, else the raw code.
    pub fn condition_text(&self) -> Option<&str> {
        non_empty(self.condition_label.as_deref()).or_else(|| non_empty(self.condition.as_deref()))
    }

    /// First image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether a struck-through original price should be shown.
    pub fn is_discounted(&self) -> bool {
        self.original_price > self.price
    }

    /// Current price as money.
    pub fn price_money(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }

    /// Value of a single installment of `price`.
    pub fn installment_price(&self, price: f64, currency: Currency) -> Money {
        Money::from_decimal(price, currency).divide(self.installments)
    }

    /// Best-seller score used when no sales data is available.
    pub fn popularity_score(&self) -> f64 {
        self.rating * f64::from(self.reviews.max(1))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
