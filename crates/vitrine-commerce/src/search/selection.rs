//! The shopper's current facet selections.

use serde::{Deserialize, Serialize};

use crate::search::price_band::PriceBand;

/// A filterable product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Model,
    Condition,
    Capacity,
    Color,
    PriceBand,
}

impl FacetKind {
    /// All facets, in the order the picker shows active filters.
    pub const ALL: [FacetKind; 5] = [
        FacetKind::Model,
        FacetKind::Condition,
        FacetKind::Capacity,
        FacetKind::Color,
        FacetKind::PriceBand,
    ];

    /// Picker section title.
    pub fn title(&self) -> &'static str {
        match self {
            FacetKind::Model => "Modelo",
            FacetKind::Condition => "Condição",
            FacetKind::Capacity => "Capacidade",
            FacetKind::Color => "Cor",
            FacetKind::PriceBand => "Preço",
        }
    }
}

/// One selected facet value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "snake_case")]
pub enum SelectedValue {
    Model(String),
    Condition(String),
    Capacity(String),
    Color(String),
    /// Index into the fixed price-band table.
    PriceBand(usize),
}

impl SelectedValue {
    /// Build a value for `kind` from its textual form.
    ///
    /// Price bands are given by index; text that is not an index yields a
    /// band that matches nothing.
    pub fn text(kind: FacetKind, value: impl Into<String>) -> Self {
        let value = value.into();
        match kind {
            FacetKind::Model => SelectedValue::Model(value),
            FacetKind::Condition => SelectedValue::Condition(value),
            FacetKind::Capacity => SelectedValue::Capacity(value),
            FacetKind::Color => SelectedValue::Color(value),
            FacetKind::PriceBand => SelectedValue::PriceBand(value.trim().parse().unwrap_or(usize::MAX)),
        }
    }

    pub fn kind(&self) -> FacetKind {
        match self {
            SelectedValue::Model(_) => FacetKind::Model,
            SelectedValue::Condition(_) => FacetKind::Condition,
            SelectedValue::Capacity(_) => FacetKind::Capacity,
            SelectedValue::Color(_) => FacetKind::Color,
            SelectedValue::PriceBand(_) => FacetKind::PriceBand,
        }
    }

    /// Label for an active-filter pill.
    pub fn label(&self) -> String {
        match self {
            SelectedValue::Model(v)
            | SelectedValue::Condition(v)
            | SelectedValue::Capacity(v)
            | SelectedValue::Color(v) => v.clone(),
            SelectedValue::PriceBand(i) => PriceBand::get(*i)
                .map(|band| band.label.to_string())
                .unwrap_or_else(|| format!("Faixa {}", i)),
        }
    }
}

/// Five independent selection sets: OR within a facet, AND across facets.
///
/// Values are not checked against the derived facets; a value that no
/// longer exists simply matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    models: Vec<String>,
    conditions: Vec<String>,
    capacities: Vec<String>,
    colors: Vec<String>,
    price_bands: Vec<usize>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, value: SelectedValue) -> bool {
        let selected = !self.contains(&value);
        if selected {
            match value {
                SelectedValue::Model(v) => self.models.push(v),
                SelectedValue::Condition(v) => self.conditions.push(v),
                SelectedValue::Capacity(v) => self.capacities.push(v),
                SelectedValue::Color(v) => self.colors.push(v),
                SelectedValue::PriceBand(i) => self.price_bands.push(i),
            }
        } else {
            self.remove(&value);
        }
        selected
    }

    /// Remove a single value. Returns whether it was selected.
    pub fn remove(&mut self, value: &SelectedValue) -> bool {
        fn take<T: PartialEq>(set: &mut Vec<T>, v: &T) -> bool {
            let before = set.len();
            set.retain(|x| x != v);
            set.len() < before
        }
        match value {
            SelectedValue::Model(v) => take(&mut self.models, v),
            SelectedValue::Condition(v) => take(&mut self.conditions, v),
            SelectedValue::Capacity(v) => take(&mut self.capacities, v),
            SelectedValue::Color(v) => take(&mut self.colors, v),
            SelectedValue::PriceBand(i) => take(&mut self.price_bands, i),
        }
    }

    pub fn contains(&self, value: &SelectedValue) -> bool {
        match value {
            SelectedValue::Model(v) => self.models.contains(v),
            SelectedValue::Condition(v) => self.conditions.contains(v),
            SelectedValue::Capacity(v) => self.capacities.contains(v),
            SelectedValue::Color(v) => self.colors.contains(v),
            SelectedValue::PriceBand(i) => self.price_bands.contains(i),
        }
    }

    /// Reset all five sets.
    pub fn clear(&mut self) {
        self.models.clear();
        self.conditions.clear();
        self.capacities.clear();
        self.colors.clear();
        self.price_bands.clear();
    }

    /// True iff any set is non-empty.
    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Total number of selected values across all facets.
    pub fn active_count(&self) -> usize {
        self.models.len()
            + self.conditions.len()
            + self.capacities.len()
            + self.colors.len()
            + self.price_bands.len()
    }

    /// Selected values of one facet, in selection order.
    pub fn values_of(&self, kind: FacetKind) -> Vec<SelectedValue> {
        match kind {
            FacetKind::Model => self.models.iter().cloned().map(SelectedValue::Model).collect(),
            FacetKind::Condition => self.conditions.iter().cloned().map(SelectedValue::Condition).collect(),
            FacetKind::Capacity => self.capacities.iter().cloned().map(SelectedValue::Capacity).collect(),
            FacetKind::Color => self.colors.iter().cloned().map(SelectedValue::Color).collect(),
            FacetKind::PriceBand => self.price_bands.iter().copied().map(SelectedValue::PriceBand).collect(),
        }
    }

    /// Whether a facet has no selection (and so imposes no constraint).
    pub fn is_unconstrained(&self, kind: FacetKind) -> bool {
        match kind {
            FacetKind::Model => self.models.is_empty(),
            FacetKind::Condition => self.conditions.is_empty(),
            FacetKind::Capacity => self.capacities.is_empty(),
            FacetKind::Color => self.colors.is_empty(),
            FacetKind::PriceBand => self.price_bands.is_empty(),
        }
    }

    /// Every selected value, grouped by facet, as shown in the active-filter pills.
    pub fn pills(&self) -> Vec<FilterPill> {
        FacetKind::ALL
            .iter()
            .flat_map(|kind| self.values_of(*kind))
            .map(|value| FilterPill {
                label: value.label(),
                value,
            })
            .collect()
    }
}

/// Set equality per facet; selection order does not matter.
impl PartialEq for FilterSelection {
    fn eq(&self, other: &Self) -> bool {
        fn same<T: PartialEq>(a: &[T], b: &[T]) -> bool {
            a.len() == b.len() && a.iter().all(|x| b.contains(x))
        }
        same(&self.models, &other.models)
            && same(&self.conditions, &other.conditions)
            && same(&self.capacities, &other.capacities)
            && same(&self.colors, &other.colors)
            && same(&self.price_bands, &other.price_bands)
    }
}

/// A removable active-filter chip.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterPill {
    pub label: String,
    /// Value to remove when the chip is dismissed.
    pub value: SelectedValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut selection = FilterSelection::new();
        selection.toggle(SelectedValue::Model("IPHONE 13".to_string()));
        selection.toggle(SelectedValue::PriceBand(1));
        let before = selection.clone();

        for value in [
            SelectedValue::Model("IPHONE 13".to_string()),
            SelectedValue::Model("IPHONE 12".to_string()),
            SelectedValue::Color("Azul".to_string()),
            SelectedValue::PriceBand(1),
            SelectedValue::PriceBand(3),
        ] {
            selection.toggle(value.clone());
            selection.toggle(value);
            assert_eq!(selection, before);
        }
    }

    #[test]
    fn test_toggle_reports_state() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle(SelectedValue::Capacity("128GB".to_string())));
        assert!(!selection.toggle(SelectedValue::Capacity("128GB".to_string())));
        assert!(!selection.has_active());
    }

    #[test]
    fn test_clear_and_has_active() {
        let mut selection = FilterSelection::new();
        assert!(!selection.has_active());
        selection.toggle(SelectedValue::Condition("Novo".to_string()));
        selection.toggle(SelectedValue::PriceBand(0));
        assert!(selection.has_active());
        assert_eq!(selection.active_count(), 2);
        selection.clear();
        assert!(!selection.has_active());
        assert_eq!(selection, FilterSelection::new());
    }

    #[test]
    fn test_stale_values_are_accepted() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle(SelectedValue::Model("IPHONE 99".to_string())));
        assert!(selection.toggle(SelectedValue::PriceBand(42)));
        assert_eq!(selection.active_count(), 2);
    }

    #[test]
    fn test_pills_in_facet_order() {
        let mut selection = FilterSelection::new();
        selection.toggle(SelectedValue::PriceBand(0));
        selection.toggle(SelectedValue::Color("Azul".to_string()));
        selection.toggle(SelectedValue::Model("IPHONE 13".to_string()));

        let labels: Vec<_> = selection.pills().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["IPHONE 13", "Azul", "Até R$ 1.500"]);
    }

    #[test]
    fn test_remove_single_value() {
        let mut selection = FilterSelection::new();
        selection.toggle(SelectedValue::Color("Azul".to_string()));
        selection.toggle(SelectedValue::Color("Preto".to_string()));
        assert!(selection.remove(&SelectedValue::Color("Azul".to_string())));
        assert!(!selection.remove(&SelectedValue::Color("Azul".to_string())));
        assert_eq!(selection.values_of(FacetKind::Color), vec![SelectedValue::Color("Preto".to_string())]);
    }

    #[test]
    fn test_text_constructor() {
        assert_eq!(SelectedValue::text(FacetKind::PriceBand, "2"), SelectedValue::PriceBand(2));
        assert_eq!(
            SelectedValue::text(FacetKind::PriceBand, "cheap"),
            SelectedValue::PriceBand(usize::MAX)
        );
        assert_eq!(SelectedValue::text(FacetKind::Color, "Azul").kind(), FacetKind::Color);
    }
}
