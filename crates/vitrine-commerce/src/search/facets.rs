//! Facet derivation: distinct values and counts from the current product list.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::Product;
use crate::search::extract::FacetExtractor;
use crate::search::price_band::PRICE_BANDS;
use crate::search::selection::{FacetKind, FilterSelection, SelectedValue};

/// A single facet value with count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    pub value: String,
    /// Number of products exhibiting this value (always at least 1).
    pub count: usize,
}

/// A color facet value, carrying its swatch code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorFacetValue {
    /// Capitalized display value, e.g. "Azul".
    pub value: String,
    /// Swatch, e.g. "#007AFF".
    pub code: String,
    pub count: usize,
}

/// The four derived facet groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AvailableFacets {
    pub models: Vec<FacetValue>,
    pub conditions: Vec<FacetValue>,
    pub capacities: Vec<FacetValue>,
    pub colors: Vec<ColorFacetValue>,
}

/// Counts that remember first-seen order.
#[derive(Default)]
struct Tally {
    order: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, value: String) {
        match self.positions.get(&value) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.positions.insert(value.clone(), self.order.len());
                self.order.push((value, 1));
            }
        }
    }

    fn into_values(self) -> Vec<FacetValue> {
        self.order
            .into_iter()
            .map(|(value, count)| FacetValue { value, count })
            .collect()
    }
}

impl AvailableFacets {
    /// Derive all facet groups from `products`.
    ///
    /// An absent product list (still loading, or failed) yields empty groups.
    pub fn derive<E: FacetExtractor + ?Sized>(extractor: &E, products: Option<&[Product]>) -> Self {
        let Some(products) = products else {
            return Self::default();
        };

        let mut models = Tally::default();
        let mut conditions = Tally::default();
        let mut capacities = Tally::default();
        let mut colors = Tally::default();

        for product in products {
            if let Some(model) = extractor.model(product) {
                models.add(model);
            }
            if let Some(condition) = extractor.condition(product) {
                conditions.add(condition);
            }
            if let Some(capacity) = extractor.capacity(product) {
                capacities.add(capacity);
            }
            if let Some(color) = extractor.color(product) {
                colors.add(color);
            }
        }

        let mut models = models.into_values();
        models.sort_by_key(|m| std::cmp::Reverse(leading_number(&m.value)));

        let mut capacities = capacities.into_values();
        capacities.sort_by(|a, b| compare_capacity(&a.value, &b.value));

        let mut colors: Vec<ColorFacetValue> = colors
            .into_values()
            .into_iter()
            .map(|c| ColorFacetValue {
                code: extractor.color_code(&c.value).to_string(),
                value: capitalize(&c.value),
                count: c.count,
            })
            .collect();
        colors.sort_by_cached_key(|c| (collation_key(&c.value), c.value.clone()));

        tracing::debug!(
            products = products.len(),
            models = models.len(),
            conditions = conditions.order.len(),
            capacities = capacities.len(),
            colors = colors.len(),
            "derived facets"
        );

        Self {
            models,
            conditions: conditions.into_values(),
            capacities,
            colors,
        }
    }

    /// True when no facet group has any value.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
            && self.conditions.is_empty()
            && self.capacities.is_empty()
            && self.colors.is_empty()
    }

    /// Models whose value contains `search`, case-insensitively.
    pub fn search_models(&self, search: &str) -> Vec<&FacetValue> {
        let needle = search.to_lowercase();
        self.models
            .iter()
            .filter(|m| m.value.to_lowercase().contains(&needle))
            .collect()
    }

    /// Picker groups in display order, with selection state applied.
    ///
    /// Groups without values are omitted, except the price group, which
    /// always lists the four fixed bands.
    pub fn groups(&self, selection: &FilterSelection) -> Vec<FacetGroup> {
        let text_group = |kind: FacetKind, values: &[FacetValue]| FacetGroup {
            kind,
            title: kind.title(),
            options: values
                .iter()
                .map(|v| FacetOption {
                    selected: selection.contains(&SelectedValue::text(kind, v.value.clone())),
                    value: SelectedValue::text(kind, v.value.clone()),
                    label: v.value.clone(),
                    count: Some(v.count),
                    color_code: None,
                })
                .collect(),
        };

        let price = FacetGroup {
            kind: FacetKind::PriceBand,
            title: FacetKind::PriceBand.title(),
            options: PRICE_BANDS
                .iter()
                .enumerate()
                .map(|(i, band)| FacetOption {
                    value: SelectedValue::PriceBand(i),
                    label: band.label.to_string(),
                    count: None,
                    color_code: None,
                    selected: selection.contains(&SelectedValue::PriceBand(i)),
                })
                .collect(),
        };

        let colors = FacetGroup {
            kind: FacetKind::Color,
            title: FacetKind::Color.title(),
            options: self
                .colors
                .iter()
                .map(|c| FacetOption {
                    value: SelectedValue::Color(c.value.clone()),
                    label: c.value.clone(),
                    count: Some(c.count),
                    color_code: Some(c.code.clone()),
                    selected: selection.contains(&SelectedValue::Color(c.value.clone())),
                })
                .collect(),
        };

        [
            text_group(FacetKind::Model, &self.models),
            text_group(FacetKind::Condition, &self.conditions),
            price,
            text_group(FacetKind::Capacity, &self.capacities),
            colors,
        ]
        .into_iter()
        .filter(|g| g.kind == FacetKind::PriceBand || !g.options.is_empty())
        .collect()
    }
}

/// One section of the filter picker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetGroup {
    pub kind: FacetKind,
    pub title: &'static str,
    pub options: Vec<FacetOption>,
}

/// One checkbox in the filter picker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetOption {
    /// Value to toggle when the option is clicked.
    pub value: SelectedValue,
    pub label: String,
    /// Occurrence count; price bands have none.
    pub count: Option<usize>,
    pub color_code: Option<String>,
    pub selected: bool,
}

/// First run of digits in `s`, or 0.
fn leading_number(s: &str) -> u64 {
    s.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
        .unwrap_or(0)
}

/// GB before TB; numeric within a unit.
fn compare_capacity(a: &str, b: &str) -> Ordering {
    let a_tb = a.contains("TB");
    let b_tb = b.contains("TB");
    a_tb.cmp(&b_tb)
        .then_with(|| leading_number(a).cmp(&leading_number(b)))
}

/// Lowercased, accent-stripped form used to order color names.
fn collation_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
