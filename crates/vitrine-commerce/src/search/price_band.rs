//! Fixed price bands for coarse price filtering.

use serde::Serialize;

/// A named half-open price interval `[min, max)`, in reais.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBand {
    pub label: &'static str,
    pub min: f64,
    /// Exclusive upper bound; `None` is unbounded.
    pub max: Option<f64>,
}

/// The four bands shown in the picker, regardless of the catalog.
pub const PRICE_BANDS: [PriceBand; 4] = [
    PriceBand { label: "Até R$ 1.500", min: 0.0, max: Some(1500.0) },
    PriceBand { label: "R$ 1.500 - R$ 3.000", min: 1500.0, max: Some(3000.0) },
    PriceBand { label: "R$ 3.000 - R$ 5.000", min: 3000.0, max: Some(5000.0) },
    PriceBand { label: "Acima de R$ 5.000", min: 5000.0, max: None },
];

impl PriceBand {
    /// Band at `index` in the fixed table.
    pub fn get(index: usize) -> Option<&'static PriceBand> {
        PRICE_BANDS.get(index)
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price < max)
    }
}
