//! Product catalog module.
//!
//! Contains the product record, condition grouping, and variation selection.

mod condition;
mod product;
mod variation;

pub use condition::{condition_sections, condition_title, ConditionSection, CONDITION_SECTIONS};
pub use product::Product;
pub use variation::{
    CapacityOption, CartLine, ColorOption, ProductVariations, StockStatus, VariantSelection,
    Variation, LOW_STOCK_THRESHOLD,
};
