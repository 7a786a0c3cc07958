//! Facet extraction from free-text product records.
//!
//! Catalogs name their products differently, so the matchers live behind
//! [`FacetExtractor`]. The deriver and the filter evaluator only talk to the
//! trait; [`SmartphoneExtractor`] is the matcher set for phone listings such
//! as "iPhone 13 Pro Max 256GB Grafite".

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Product;
use crate::error::CommerceError;

/// Swatch used when a color has no entry in the table.
pub const FALLBACK_COLOR_CODE: &str = "#A0A0A0";

/// Color names recognized inside product names, with their swatch codes.
pub const COLOR_CODES: &[(&str, &str)] = &[
    ("amarelo", "#FFD700"),
    ("azul", "#007AFF"),
    ("branco", "#FFFFFF"),
    ("bronze", "#CD7F32"),
    ("cinza", "#808080"),
    ("dourado", "#FFD700"),
    ("laranja", "#FF9500"),
    ("prata", "#C0C0C0"),
    ("preto", "#1C1C1E"),
    ("rosa", "#FF2D55"),
    ("roxo", "#AF52DE"),
    ("verde", "#34C759"),
    ("vermelho", "#FF3B30"),
    ("titânio", "#A0A0A0"),
    ("natural", "#E5D6C8"),
    ("meia-noite", "#1C1C1E"),
    ("estelar", "#F5F5DC"),
];

const DEFAULT_BRAND: &str = "iPhone";

static CAPACITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(GB|TB)").expect("capacity pattern is valid"));

static DEFAULT_MODEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    model_pattern(DEFAULT_BRAND).expect("default model pattern is valid")
});

/// Matchers that pull facet values out of a product.
///
/// Every method returns the already-normalized facet value; `None` means the
/// product contributes nothing to that facet.
pub trait FacetExtractor {
    /// Model, e.g. "IPHONE 13 PRO MAX".
    fn model(&self, product: &Product) -> Option<String>;

    /// Condition as shown to shoppers.
    fn condition(&self, product: &Product) -> Option<String> {
        product.condition_text().map(str::to_string)
    }

    /// Storage capacity, e.g. "256GB".
    fn capacity(&self, product: &Product) -> Option<String>;

    /// Lowercase color key, e.g. "azul".
    fn color(&self, product: &Product) -> Option<String>;

    /// Model with the brand prefix removed, for loose name matching.
    fn strip_brand<'m>(&self, model: &'m str) -> Cow<'m, str>;

    /// Swatch code for a color key.
    fn color_code(&self, color: &str) -> &str;
}

/// Extractor for smartphone listings of a single brand.
#[derive(Debug, Clone)]
pub struct SmartphoneExtractor {
    brand_prefix: String,
    model_pattern: Regex,
}

impl SmartphoneExtractor {
    /// Build an extractor for a brand name as it appears in listings.
    pub fn new(brand: &str) -> Result<Self, CommerceError> {
        Ok(Self {
            brand_prefix: format!("{} ", brand.to_uppercase()),
            model_pattern: model_pattern(brand)?,
        })
    }

    /// The brand prefix stripped from models, e.g. "IPHONE ".
    pub fn brand_prefix(&self) -> &str {
        &self.brand_prefix
    }
}

impl Default for SmartphoneExtractor {
    fn default() -> Self {
        Self {
            brand_prefix: format!("{} ", DEFAULT_BRAND.to_uppercase()),
            model_pattern: DEFAULT_MODEL_PATTERN.clone(),
        }
    }
}

/// `<brand> <number|SE> [Pro Max | Pro|Plus|Max|Mini [Pro Max]]`
fn model_pattern(brand: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i){}\s+(?:\d+|SE)(?:\s*Pro\s*Max|\s*(?:Pro|Plus|Max|Mini)(?:\s*Pro\s*Max)?)?",
        regex::escape(brand)
    ))
}

impl FacetExtractor for SmartphoneExtractor {
    fn model(&self, product: &Product) -> Option<String> {
        self.model_pattern
            .find(&product.name)
            .map(|m| m.as_str().to_uppercase().trim().to_string())
    }

    fn capacity(&self, product: &Product) -> Option<String> {
        let caps = CAPACITY_PATTERN.captures(&product.name)?;
        Some(format!("{}{}", &caps[1], caps[2].to_uppercase()))
    }

    fn color(&self, product: &Product) -> Option<String> {
        if let Some(color) = product.color.as_deref() {
            let key = color.trim().to_lowercase();
            if !key.is_empty() {
                return Some(key);
            }
        }

        product
            .name
            .to_lowercase()
            .split_whitespace()
            .find(|word| known_color(word).is_some())
            .map(str::to_string)
    }

    fn strip_brand<'m>(&self, model: &'m str) -> Cow<'m, str> {
        if model.contains(self.brand_prefix.as_str()) {
            Cow::Owned(model.replacen(self.brand_prefix.as_str(), "", 1))
        } else {
            Cow::Borrowed(model)
        }
    }

    fn color_code(&self, color: &str) -> &str {
        known_color(&color.to_lowercase()).unwrap_or(FALLBACK_COLOR_CODE)
    }
}

fn known_color(word: &str) -> Option<&'static str> {
    COLOR_CODES
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Product {
        Product::new("1", name, 1000.0)
    }

    #[test]
    fn test_model_extraction() {
        let ex = SmartphoneExtractor::default();
        let cases = [
            ("iPhone 13 Pro Max 256GB Grafite", Some("IPHONE 13 PRO MAX")),
            ("iPhone 13 128GB Preto", Some("IPHONE 13")),
            ("Apple iphone 15 plus 128GB", Some("IPHONE 15 PLUS")),
            ("iPhone SE 64GB Branco", Some("IPHONE SE")),
            ("iPhone 12 Mini 64GB", Some("IPHONE 12 MINI")),
            ("iPhone 14 Pro 1TB", Some("IPHONE 14 PRO")),
            ("Galaxy S23 256GB", None),
            ("Capa para iPhone", None),
        ];
        for (name, expected) in cases {
            assert_eq!(ex.model(&named(name)).as_deref(), expected, "{name}");
        }
    }

    #[test]
    fn test_other_brand() {
        let ex = SmartphoneExtractor::new("Galaxy").unwrap();
        assert_eq!(ex.model(&named("Galaxy 23 Plus 256GB")).as_deref(), Some("GALAXY 23 PLUS"));
        assert_eq!(ex.strip_brand("GALAXY 23 PLUS"), "23 PLUS");
    }

    #[test]
    fn test_capacity_extraction() {
        let ex = SmartphoneExtractor::default();
        assert_eq!(ex.capacity(&named("iPhone 13 256GB Azul")).as_deref(), Some("256GB"));
        assert_eq!(ex.capacity(&named("iPhone 15 Pro 1 tb")).as_deref(), Some("1TB"));
        assert_eq!(ex.capacity(&named("iPhone 15 Pro")), None);
    }

    #[test]
    fn test_color_prefers_explicit_field() {
        let ex = SmartphoneExtractor::default();
        let mut p = named("iPhone 14 Azul 128GB");
        p.color = Some("  Verde  ".to_string());
        assert_eq!(ex.color(&p).as_deref(), Some("verde"));
    }

    #[test]
    fn test_color_falls_back_to_first_name_token() {
        let ex = SmartphoneExtractor::default();
        let mut p = named("iPhone 14 Azul Preto 128GB");
        p.color = Some("   ".to_string());
        assert_eq!(ex.color(&p).as_deref(), Some("azul"));

        assert_eq!(ex.color(&named("iPhone 14 Azul 128GB")).as_deref(), Some("azul"));
        assert_eq!(ex.color(&named("iPhone 14 128GB")), None);
    }

    #[test]
    fn test_strip_brand() {
        let ex = SmartphoneExtractor::default();
        assert_eq!(ex.strip_brand("IPHONE 13 PRO"), "13 PRO");
        assert_eq!(ex.strip_brand("13 PRO"), "13 PRO");
    }

    #[test]
    fn test_color_code_lookup() {
        let ex = SmartphoneExtractor::default();
        assert_eq!(ex.color_code("Azul"), "#007AFF");
        assert_eq!(ex.color_code("grafite"), FALLBACK_COLOR_CODE);
    }
}
