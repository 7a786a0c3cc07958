//! Filter evaluation: which products pass the query, category and facet selections.
//!
//! Model, capacity and color selections are plain substring checks against
//! the product name and fields, so a model selection like "IPHONE 13" also
//! matches "iPhone 13 Pro".

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::extract::FacetExtractor;
use crate::search::price_band::PriceBand;
use crate::search::query::SearchParams;
use crate::search::selection::{FacetKind, FilterSelection, SelectedValue};

/// One conjunct of the product predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clause {
    Category,
    Text,
    Facet(FacetKind),
}

impl Clause {
    /// Every clause, in evaluation order.
    pub const ALL: [Clause; 7] = [
        Clause::Category,
        Clause::Text,
        Clause::Facet(FacetKind::Model),
        Clause::Facet(FacetKind::Condition),
        Clause::Facet(FacetKind::Capacity),
        Clause::Facet(FacetKind::Color),
        Clause::Facet(FacetKind::PriceBand),
    ];
}

/// Whether `product` matches a single selected facet value.
pub fn value_matches<E: FacetExtractor + ?Sized>(
    extractor: &E,
    product: &Product,
    value: &SelectedValue,
) -> bool {
    match value {
        SelectedValue::Model(model) => {
            let name = product.name.to_uppercase();
            name.contains(model.as_str()) || name.contains(extractor.strip_brand(model).as_ref())
        }
        SelectedValue::Condition(condition) => {
            let own = extractor.condition(product).unwrap_or_default().to_lowercase();
            let wanted = condition.to_lowercase();
            own.contains(&wanted) || wanted.contains(&own)
        }
        SelectedValue::Capacity(capacity) => {
            let wanted = capacity.to_uppercase();
            product.name.to_uppercase().contains(&wanted)
                || product
                    .capacity
                    .as_deref()
                    .unwrap_or("")
                    .to_uppercase()
                    .contains(&wanted)
        }
        SelectedValue::Color(color) => {
            let wanted = color.to_lowercase();
            product
                .color
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&wanted)
                || product.name.to_lowercase().contains(&wanted)
        }
        SelectedValue::PriceBand(index) => {
            PriceBand::get(*index).is_some_and(|band| band.contains(product.price))
        }
    }
}

/// Evaluates the search predicate for one set of inputs.
pub struct FilterEvaluator<'a, E: FacetExtractor + ?Sized> {
    extractor: &'a E,
    category: Option<String>,
    query: String,
    selection: &'a FilterSelection,
    /// Selected values per facet, in `FacetKind::ALL` order.
    selected: [Vec<SelectedValue>; 5],
}

impl<'a, E: FacetExtractor + ?Sized> FilterEvaluator<'a, E> {
    pub fn new(extractor: &'a E, params: &SearchParams, selection: &'a FilterSelection) -> Self {
        Self {
            extractor,
            category: params
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(str::to_lowercase),
            query: params.q.to_lowercase(),
            selection,
            selected: FacetKind::ALL.map(|kind| selection.values_of(kind)),
        }
    }

    pub fn extractor(&self) -> &'a E {
        self.extractor
    }

    pub fn selection(&self) -> &'a FilterSelection {
        self.selection
    }

    /// Selected values of one facet.
    pub fn selected(&self, kind: FacetKind) -> &[SelectedValue] {
        let slot = FacetKind::ALL.iter().position(|k| *k == kind).unwrap_or_default();
        &self.selected[slot]
    }

    /// Whether a clause constrains anything with the current inputs.
    pub fn is_active(&self, clause: Clause) -> bool {
        match clause {
            Clause::Category => self.category.is_some(),
            Clause::Text => !self.query.is_empty(),
            Clause::Facet(kind) => !self.selection.is_unconstrained(kind),
        }
    }

    /// Evaluate one clause. Inactive clauses pass.
    pub fn passes(&self, clause: Clause, product: &Product) -> bool {
        match clause {
            Clause::Category => self.category.as_deref().map_or(true, |wanted| {
                let equals = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase() == wanted);
                equals(product.category_slug.as_deref()) || equals(product.category.as_deref())
            }),
            Clause::Text => {
                if self.query.is_empty() {
                    return true;
                }
                let contains = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase().contains(&self.query));
                contains(Some(product.name.as_str()))
                    || contains(product.description.as_deref())
                    || contains(product.category.as_deref())
            }
            Clause::Facet(kind) => {
                let values = self.selected(kind);
                values.is_empty()
                    || values
                        .iter()
                        .any(|v| value_matches(self.extractor, product, v))
            }
        }
    }

    /// Whether `product` passes every clause.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_in_order(&Clause::ALL, product)
    }

    /// Conjunction of `clauses` in the given order.
    pub fn matches_in_order(&self, clauses: &[Clause], product: &Product) -> bool {
        clauses.iter().all(|c| self.passes(*c, product))
    }

    /// Positions of the matching products, in catalog order.
    pub fn filter_positions(&self, products: &[Product]) -> Vec<usize> {
        products
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Matching products, in catalog order.
    pub fn apply<'p>(&self, products: &'p [Product]) -> Vec<&'p Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::extract::SmartphoneExtractor;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product::new(id, name, price)
    }

    fn catalog() -> Vec<Product> {
        let mut a = product("a", "iPhone 13 Pro Max 256GB Grafite", 5200.0);
        a.condition = Some("seminovo".to_string());
        a.category = Some("iPhone".to_string());
        a.category_slug = Some("iphone".to_string());

        let mut b = product("b", "iPhone 12 64GB Azul", 1800.0);
        b.condition_label = Some("Usado - Bom".to_string());
        b.category = Some("iPhone".to_string());
        b.description = Some("Bateria 89%".to_string());

        let mut c = product("c", "iPhone 13 128GB", 3100.0);
        c.condition = Some("novo".to_string());
        c.color = Some("Rosa".to_string());
        c.category = Some("Lacrados".to_string());
        c.category_slug = Some("lacrados".to_string());

        let mut d = product("d", "Carregador 20W", 150.0);
        d.capacity = Some("n/a".to_string());
        d.category = Some("Acessórios".to_string());

        vec![a, b, c, d]
    }

    fn run(params: &SearchParams, selection: &FilterSelection) -> Vec<String> {
        let extractor = SmartphoneExtractor::default();
        let products = catalog();
        FilterEvaluator::new(&extractor, params, selection)
            .apply(&products)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    fn select(values: &[SelectedValue]) -> FilterSelection {
        let mut selection = FilterSelection::new();
        for v in values {
            selection.toggle(v.clone());
        }
        selection
    }

    #[test]
    fn test_no_active_clause_is_identity() {
        let ids = run(&SearchParams::new(), &FilterSelection::new());
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_category_matches_slug_or_name() {
        let by_slug = run(&SearchParams::new().with_category("LACRADOS"), &FilterSelection::new());
        assert_eq!(by_slug, vec!["c"]);

        let by_name = run(&SearchParams::new().with_category("iphone"), &FilterSelection::new());
        assert_eq!(by_name, vec!["a", "b"]);

        let by_name_only = run(&SearchParams::new().with_category("acessórios"), &FilterSelection::new());
        assert_eq!(by_name_only, vec!["d"]);
    }

    #[test]
    fn test_text_query_checks_name_description_category() {
        assert_eq!(run(&SearchParams::new().with_query("BATERIA"), &FilterSelection::new()), vec!["b"]);
        assert_eq!(run(&SearchParams::new().with_query("lacrad"), &FilterSelection::new()), vec!["c"]);
        assert_eq!(run(&SearchParams::new().with_query("pro max"), &FilterSelection::new()), vec!["a"]);
    }

    #[test]
    fn test_model_selection_is_a_loose_substring() {
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Model("IPHONE 13".into())]));
        assert_eq!(ids, vec!["a", "c"]);

        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Model("IPHONE 13 PRO MAX".into())]));
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_model_matches_without_brand_prefix() {
        let extractor = SmartphoneExtractor::default();
        let p = product("x", "Apple 13 Pro 128GB", 3000.0);
        assert!(value_matches(&extractor, &p, &SelectedValue::Model("IPHONE 13 PRO".into())));
    }

    #[test]
    fn test_condition_matches_in_both_directions() {
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Condition("Usado".into())]));
        assert_eq!(ids, vec!["b", "d"]);

        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Condition("SEMINOVO premium".into())]));
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_capacity_checks_name_and_field() {
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Capacity("64gb".into())]));
        assert_eq!(ids, vec!["b"]);
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Capacity("N/A".into())]));
        assert_eq!(ids, vec!["d"]);
    }

    #[test]
    fn test_color_checks_field_and_name() {
        let ids = run(
            &SearchParams::new(),
            &select(&[SelectedValue::Color("Rosa".into()), SelectedValue::Color("Azul".into())]),
        );
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_price_band_boundary_is_half_open() {
        let extractor = SmartphoneExtractor::default();
        let p = product("x", "iPhone 11", 1500.0);
        let params = SearchParams::new();

        let lower = select(&[SelectedValue::PriceBand(0)]);
        assert!(!FilterEvaluator::new(&extractor, &params, &lower).matches(&p));

        let upper = select(&[SelectedValue::PriceBand(1)]);
        assert!(FilterEvaluator::new(&extractor, &params, &upper).matches(&p));
    }

    #[test]
    fn test_unknown_price_band_matches_nothing() {
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::PriceBand(9)]));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_stale_selection_is_inert() {
        let ids = run(&SearchParams::new(), &select(&[SelectedValue::Model("IPHONE 99".into())]));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_facets_are_anded() {
        let ids = run(
            &SearchParams::new(),
            &select(&[
                SelectedValue::Model("IPHONE 13".into()),
                SelectedValue::PriceBand(3),
            ]),
        );
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_clause_order_does_not_matter() {
        let extractor = SmartphoneExtractor::default();
        let products = catalog();
        let params = SearchParams::new().with_query("iphone");
        let selection = select(&[
            SelectedValue::Model("IPHONE 13".into()),
            SelectedValue::Color("rosa".into()),
            SelectedValue::PriceBand(2),
            SelectedValue::Condition("novo".into()),
        ]);
        let evaluator = FilterEvaluator::new(&extractor, &params, &selection);

        let mut reversed = Clause::ALL;
        reversed.reverse();
        let mut rotated = Clause::ALL;
        rotated.rotate_left(3);

        for p in &products {
            let expected = evaluator.matches(p);
            assert_eq!(evaluator.matches_in_order(&reversed, p), expected);
            assert_eq!(evaluator.matches_in_order(&rotated, p), expected);
        }
        assert_eq!(evaluator.filter_positions(&products), vec![2]);
    }

    #[test]
    fn test_end_to_end_price_and_condition() {
        let extractor = SmartphoneExtractor::default();
        let mut a = product("A", "Produto A", 1000.0);
        a.condition = Some("novo".to_string());
        let mut b = product("B", "Produto B", 2000.0);
        b.condition = Some("seminovo".to_string());
        let products = vec![a, b];

        let selection = select(&[
            SelectedValue::PriceBand(0),
            SelectedValue::Condition("novo".into()),
        ]);
        let params = SearchParams::new();
        let evaluator = FilterEvaluator::new(&extractor, &params, &selection);
        let ids: Vec<_> = evaluator.apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A"]);
    }
}
