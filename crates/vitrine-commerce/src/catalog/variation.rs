//! Color/capacity variations and the product-page selection over them.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Stock at or below this level is advertised as scarce.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A color option offered for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorOption {
    pub name: String,
    /// Swatch color, e.g. "#1C1C1E".
    #[serde(default)]
    pub hex: Option<String>,
    pub available: bool,
}

/// A storage capacity offered for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityOption {
    pub value: String,
    pub available: bool,
}

/// One purchasable color + capacity combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    pub color: String,
    pub capacity: String,
    pub price: f64,
    pub stock: i64,
    pub available: bool,
}

/// All variations of a single product, as served by the variations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductVariations {
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub capacities: Vec<CapacityOption>,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

/// How much of the current selection can be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "stock", rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    /// Only a handful left.
    Low(i64),
    Available(i64),
}

impl StockStatus {
    pub fn from_stock(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::Low(stock)
        } else {
            StockStatus::Available(stock)
        }
    }

    pub fn can_purchase(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }

    /// Shopper-facing message, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            StockStatus::OutOfStock => Some("Esgotado".to_string()),
            StockStatus::Low(n) => Some(format!("Apenas {} unidades em estoque!", n)),
            StockStatus::Available(_) => None,
        }
    }
}

/// Line handed to the cart collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    /// Unit price in reais.
    pub price: f64,
    pub color: String,
    pub capacity: String,
    pub quantity: i64,
}

impl CartLine {
    /// Confirmation shown after the line is handed off.
    pub fn confirmation(&self) -> String {
        if self.quantity > 1 {
            format!("{} itens adicionados ao carrinho!", self.quantity)
        } else {
            format!("{} item adicionado ao carrinho!", self.quantity)
        }
    }
}

/// The shopper's color/capacity/quantity choice on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSelection {
    pub color: Option<String>,
    pub capacity: Option<String>,
    pub quantity: i64,
}

impl Default for VariantSelection {
    fn default() -> Self {
        Self {
            color: None,
            capacity: None,
            quantity: 1,
        }
    }
}

impl VariantSelection {
    /// Initial selection: the first available color and the first available capacity.
    pub fn initial(variations: Option<&ProductVariations>) -> Self {
        let mut selection = Self::default();
        if let Some(v) = variations {
            selection.color = v.colors.iter().find(|c| c.available).map(|c| c.name.clone());
            selection.capacity = v
                .capacities
                .iter()
                .find(|c| c.available)
                .map(|c| c.value.clone());
        }
        selection
    }

    pub fn select_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
    }

    pub fn select_capacity(&mut self, capacity: impl Into<String>) {
        self.capacity = Some(capacity.into());
    }

    /// The variation matching both chosen color and capacity.
    pub fn current_variation<'v>(&self, variations: Option<&'v ProductVariations>) -> Option<&'v Variation> {
        let (color, capacity) = (self.color.as_deref()?, self.capacity.as_deref()?);
        variations?
            .variations
            .iter()
            .find(|v| v.color == color && v.capacity == capacity)
    }

    /// Variation price when it has one, else the product's list price.
    pub fn current_price(&self, product: &Product, variations: Option<&ProductVariations>) -> f64 {
        self.current_variation(variations)
            .map(|v| v.price)
            .filter(|p| *p > 0.0)
            .unwrap_or(product.price)
    }

    /// Variation stock when the combination exists, else the product's stock.
    pub fn current_stock(&self, product: &Product, variations: Option<&ProductVariations>) -> i64 {
        self.current_variation(variations)
            .map(|v| v.stock)
            .unwrap_or(product.stock)
    }

    /// Whether `capacity` can be bought in the selected color.
    ///
    /// False until a color is chosen.
    pub fn is_capacity_available(&self, variations: Option<&ProductVariations>, capacity: &str) -> bool {
        let (Some(v), Some(color)) = (variations, self.color.as_deref()) else {
            return false;
        };
        v.variations
            .iter()
            .any(|x| x.color == color && x.capacity == capacity && x.available)
    }

    /// Whether `color` can be bought in the selected capacity.
    ///
    /// True until a capacity is chosen.
    pub fn is_color_available(&self, variations: Option<&ProductVariations>, color: &str) -> bool {
        let (Some(v), Some(capacity)) = (variations, self.capacity.as_deref()) else {
            return true;
        };
        v.variations
            .iter()
            .any(|x| x.color == color && x.capacity == capacity && x.available)
    }

    /// Re-align quantity after the available stock changed.
    pub fn sync_quantity(&mut self, stock: i64) {
        if self.quantity > stock && stock > 0 {
            self.quantity = stock;
        } else if stock > 0 && self.quantity == 0 {
            self.quantity = 1;
        }
    }

    pub fn increment(&mut self, stock: i64) {
        self.quantity = stock.min(self.quantity + 1);
    }

    pub fn decrement(&mut self) {
        self.quantity = (self.quantity - 1).max(1);
    }

    /// Build the line to hand to the cart.
    pub fn cart_line(
        &self,
        product: &Product,
        variations: Option<&ProductVariations>,
    ) -> Result<CartLine, CommerceError> {
        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }

        let color = self.color.clone().unwrap_or_default();
        let capacity = self.capacity.clone().unwrap_or_default();
        if !StockStatus::from_stock(self.current_stock(product, variations)).can_purchase() {
            return Err(CommerceError::VariationUnavailable { color, capacity });
        }

        Ok(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.primary_image().map(str::to_string),
            price: self.current_price(product, variations),
            color,
            capacity,
            quantity: self.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variations() -> ProductVariations {
        serde_json::from_str(
            r##"{
                "colors": [
                    {"name": "Preto", "hex": "#1C1C1E", "available": false},
                    {"name": "Azul", "hex": "#007AFF", "available": true}
                ],
                "capacities": [
                    {"value": "64GB", "available": true},
                    {"value": "128GB", "available": true}
                ],
                "variations": [
                    {"color": "Azul", "capacity": "64GB", "price": 1800.0, "stock": 3, "available": true},
                    {"color": "Azul", "capacity": "128GB", "price": 2100.0, "stock": 0, "available": false},
                    {"color": "Preto", "capacity": "128GB", "price": 0.0, "stock": 9, "available": true}
                ]
            }"##,
        )
        .unwrap()
    }

    fn product() -> Product {
        let mut p = Product::new("12", "iPhone 12", 1999.0);
        p.stock = 7;
        p.images = vec!["https://img/12.png".to_string()];
        p
    }

    #[test]
    fn test_initial_selection_picks_first_available() {
        let v = variations();
        let sel = VariantSelection::initial(Some(&v));
        assert_eq!(sel.color.as_deref(), Some("Azul"));
        assert_eq!(sel.capacity.as_deref(), Some("64GB"));
        assert_eq!(sel.quantity, 1);
    }

    #[test]
    fn test_initial_selection_without_variations() {
        let sel = VariantSelection::initial(None);
        assert_eq!(sel, VariantSelection::default());
    }

    #[test]
    fn test_current_price_and_stock() {
        let v = variations();
        let p = product();
        let mut sel = VariantSelection::initial(Some(&v));
        assert_eq!(sel.current_price(&p, Some(&v)), 1800.0);
        assert_eq!(sel.current_stock(&p, Some(&v)), 3);

        // Zero-priced variation falls back to the list price.
        sel.select_color("Preto");
        sel.select_capacity("128GB");
        assert_eq!(sel.current_price(&p, Some(&v)), 1999.0);
        assert_eq!(sel.current_stock(&p, Some(&v)), 9);

        // Unknown combination falls back to product values.
        sel.select_capacity("1TB");
        assert_eq!(sel.current_stock(&p, Some(&v)), 7);
    }

    #[test]
    fn test_availability_checks() {
        let v = variations();
        let mut sel = VariantSelection::default();
        assert!(!sel.is_capacity_available(Some(&v), "64GB"));
        assert!(sel.is_color_available(Some(&v), "Preto"));

        sel.select_color("Azul");
        sel.select_capacity("128GB");
        assert!(sel.is_capacity_available(Some(&v), "64GB"));
        assert!(!sel.is_capacity_available(Some(&v), "128GB"));
        assert!(sel.is_color_available(Some(&v), "Preto"));
        assert!(!sel.is_color_available(Some(&v), "Azul"));
    }

    #[test]
    fn test_quantity_is_clamped_to_stock() {
        let mut sel = VariantSelection::default();
        sel.increment(3);
        sel.increment(3);
        sel.increment(3);
        assert_eq!(sel.quantity, 3);

        sel.sync_quantity(2);
        assert_eq!(sel.quantity, 2);

        sel.decrement();
        sel.decrement();
        assert_eq!(sel.quantity, 1);

        sel.quantity = 0;
        sel.sync_quantity(4);
        assert_eq!(sel.quantity, 1);
    }

    #[test]
    fn test_cart_line() {
        let v = variations();
        let p = product();
        let mut sel = VariantSelection::initial(Some(&v));
        sel.increment(3);

        let line = sel.cart_line(&p, Some(&v)).unwrap();
        assert_eq!(line.price, 1800.0);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.color, "Azul");
        assert_eq!(line.image.as_deref(), Some("https://img/12.png"));
        assert_eq!(line.confirmation(), "2 itens adicionados ao carrinho!");
    }

    #[test]
    fn test_cart_line_rejects_sold_out() {
        let v = variations();
        let p = product();
        let mut sel = VariantSelection::initial(Some(&v));
        sel.select_capacity("128GB");
        let err = sel.cart_line(&p, Some(&v)).unwrap_err();
        assert!(matches!(err, CommerceError::VariationUnavailable { .. }));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(5), StockStatus::Low(5));
        assert_eq!(StockStatus::from_stock(6), StockStatus::Available(6));
        assert_eq!(
            StockStatus::from_stock(2).message().as_deref(),
            Some("Apenas 2 unidades em estoque!")
        );
    }
}
