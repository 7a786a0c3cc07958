//! End-to-end search page flow against a small JSON catalog.
//!
//! Exercises the public API only: load products, derive facets, toggle
//! selections, read the filtered and sorted results.
use vitrine_commerce::prelude::*;
use vitrine_commerce::search::{FacetExtractor, PRICE_BANDS};

const CATALOG: &str = r#"[
    {"id": 1, "name": "iPhone 13 Pro Max 256GB Grafite", "price": 5499.0, "condition": "seminovo",
     "conditionLabel": "Seminovo", "category": "iPhone", "categorySlug": "iphone", "rating": 4.8, "reviews": 120},
    {"id": 2, "name": "iPhone 12 64GB Azul", "price": 1899.0, "condition": "usado_bom",
     "conditionLabel": "Usado - Bom", "category": "iPhone", "categorySlug": "iphone", "rating": 4.2, "reviews": 40},
    {"id": 3, "name": "iPhone 13 128GB Meia-noite", "price": 3299.0, "condition": "novo",
     "conditionLabel": "Novo", "color": "Meia-noite", "category": "iPhone", "categorySlug": "iphone", "rating": 5.0, "reviews": 12},
    {"id": "4", "name": "iPhone 11 64GB Branco", "price": 1299.0, "condition": "recondicionado",
     "conditionLabel": "Recondicionado", "category": "iPhone", "rating": 4.0},
    {"id": 5, "name": "iPhone 15 Pro 1TB Titânio Natural", "price": 9899.0, "condition": "novo",
     "conditionLabel": "Novo", "category": "Lacrados", "categorySlug": "lacrados", "rating": 4.9, "reviews": 3},
    {"id": 6, "name": "Carregador USB-C 20W", "price": 149.0, "category": "Acessórios"}
]"#;

fn load() -> Vec<Product> {
    serde_json::from_str(CATALOG).expect("catalog parses")
}

fn ids(items: &[&Product]) -> Vec<String> {
    items.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn derives_facets_from_catalog() {
    let mut engine = SearchEngine::new();
    engine.set_products(Some(load()));

    let facets = engine.facets();
    let models: Vec<_> = facets.models.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(models, vec!["IPHONE 15 PRO", "IPHONE 13 PRO MAX", "IPHONE 13", "IPHONE 12", "IPHONE 11"]);

    let capacities: Vec<_> = facets.capacities.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(capacities, vec!["64GB", "128GB", "256GB", "1TB"]);

    let conditions: Vec<_> = facets.conditions.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(conditions, vec!["Seminovo", "Usado - Bom", "Novo", "Recondicionado"]);

    let colors: Vec<_> = facets.colors.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(colors, vec!["Azul", "Branco", "Meia-noite", "Titânio"]);
}

#[test]
fn narrows_and_widens_with_selections() {
    let mut engine = SearchEngine::new();
    engine.set_products(Some(load()));
    assert_eq!(engine.result_count(), 6);

    engine.toggle(SelectedValue::Model("IPHONE 13".to_string()));
    assert_eq!(ids(&engine.results()), vec!["1", "3"]);

    engine.toggle(SelectedValue::Model("IPHONE 11".to_string()));
    assert_eq!(ids(&engine.results()), vec!["1", "3", "4"]);

    engine.toggle(SelectedValue::PriceBand(0));
    assert_eq!(ids(&engine.results()), vec!["4"]);

    engine.toggle(SelectedValue::PriceBand(0));
    engine.toggle(SelectedValue::Condition("Novo".to_string()));
    // condition matching is by substring, so "Seminovo" is included
    assert_eq!(ids(&engine.results()), vec!["1", "3"]);

    engine.clear_filters();
    assert!(!engine.selection().has_active());
    assert_eq!(engine.result_count(), 6);
}

#[test]
fn query_string_drives_search() {
    let mut engine = SearchEngine::new();
    engine.set_products(Some(load()));
    engine.set_params(SearchParams::from_query_string("?q=iphone&sort=price_asc"));

    assert_eq!(engine.label(), "iphone");
    assert_eq!(ids(&engine.results()), vec!["4", "2", "3", "1", "5"]);

    engine.set_params(SearchParams::from_query_string("categoria=lacrados"));
    assert_eq!(ids(&engine.results()), vec!["5"]);
    assert_eq!(engine.status().summary(), "1 produtos");
}

#[test]
fn empty_state_messages() {
    let mut engine = SearchEngine::new();
    engine.set_products(Some(load()));

    engine.set_query("pixel");
    let page = engine.page();
    assert!(page.items.is_empty());
    assert_eq!(
        page.status,
        SearchStatus::Empty {
            message: "Nenhum produto encontrado para \"pixel\"".to_string(),
            can_clear_filters: false,
        }
    );
}

#[test]
fn every_product_lands_in_exactly_one_price_band() {
    let products = load();
    for product in &products {
        let hits = PRICE_BANDS.iter().filter(|b| b.contains(product.price)).count();
        assert_eq!(hits, 1, "{}", product.name);
    }
}

#[test]
fn custom_extractor_plugs_into_engine() {
    let extractor = SmartphoneExtractor::new("Galaxy").expect("valid brand");
    let mut engine = SearchEngine::with_extractor(extractor);

    let products = vec![
        Product::new("g1", "Galaxy 23 Ultra 512GB Preto", 6999.0),
        Product::new("g2", "Galaxy 21 128GB Verde", 2199.0),
        Product::new("i1", "iPhone 13 128GB Azul", 3299.0),
    ];
    engine.set_products(Some(products));

    let models: Vec<_> = engine.facets().models.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(models, vec!["GALAXY 23", "GALAXY 21"]);
    assert_eq!(engine.extractor().strip_brand("GALAXY 23"), "23");

    engine.toggle(SelectedValue::Model("GALAXY 21".to_string()));
    assert_eq!(ids(&engine.results()), vec!["g2"]);
}

#[test]
fn best_sellers_and_shipping_for_product_page() {
    let products = load();
    let viewed = ProductId::new("1");
    let top = best_sellers(&products, Some(&viewed), 8);
    assert_eq!(ids(&top[..2]), vec!["2", "3"]);

    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    let quote = ShippingEstimator::new().estimate("50030-230", today).expect("valid cep");
    assert_eq!(quote.days, 3);
    assert_eq!(quote.price_label(), "Frete Grátis!");
}
