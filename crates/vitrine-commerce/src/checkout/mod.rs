//! Checkout module.
//!
//! Shipping quotes shown on the product page before checkout.

mod shipping;

pub use shipping::{normalize_cep, CepRange, ShippingEstimator, ShippingQuote, CEP_DIGITS};
