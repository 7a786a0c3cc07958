//! Search page parameters and result ordering.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortOption {
    pub fn from_str(s: &str) -> Self {
        match s {
            "price_asc" | "menor_preco" => SortOption::PriceAsc,
            "price_desc" | "maior_preco" => SortOption::PriceDesc,
            _ => SortOption::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevância",
            SortOption::PriceAsc => "Menor preço",
            SortOption::PriceDesc => "Maior preço",
        }
    }

    /// Order `products` in place. Stable, so equal prices keep catalog order.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Relevance => {}
            SortOption::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOption::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}

/// Parameters the routing layer hands to the search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query (`q`); empty means no text constraint.
    pub q: String,
    /// Category constraint (`categoria`).
    pub category: Option<String>,
    pub sort: SortOption,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }

    /// Set the category constraint; an empty string clears it.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Parse parameters from a URL query string (`q=...&categoria=...`).
    pub fn from_query_string(qs: &str) -> Self {
        let mut params = SearchParams::default();

        for pair in qs.trim_start_matches('?').split('&') {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = urlencoding_decode(parts.next().unwrap_or(""));

            match key {
                "q" => params.q = value,
                "categoria" => params = params.with_category(value),
                "sort" => params.sort = SortOption::from_str(&value),
                _ => {}
            }
        }

        params
    }

    /// Heading for the results: category, else query, else everything.
    pub fn label(&self) -> &str {
        match (&self.category, self.q.as_str()) {
            (Some(category), _) => category.as_str(),
            (None, "") => "Todos os produtos",
            (None, q) => q,
        }
    }

    /// What the empty state says no products were found for.
    pub fn subject(&self) -> &str {
        if self.q.is_empty() {
            self.category.as_deref().unwrap_or("")
        } else {
            &self.q
        }
    }
}

/// Percent and `+` decoding for query-string values.
fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_string() {
        let params = SearchParams::from_query_string("?q=iphone+13&categoria=Seminovos&sort=price_desc&page=2");
        assert_eq!(params.q, "iphone 13");
        assert_eq!(params.category.as_deref(), Some("Seminovos"));
        assert_eq!(params.sort, SortOption::PriceDesc);
    }

    #[test]
    fn test_percent_decoding_handles_utf8() {
        let params = SearchParams::from_query_string("q=tit%C3%A2nio%20azul");
        assert_eq!(params.q, "titânio azul");
    }

    #[test]
    fn test_malformed_escape_is_kept() {
        let params = SearchParams::from_query_string("q=100%&categoria=%zz");
        assert_eq!(params.q, "100%");
        assert_eq!(params.category.as_deref(), Some("%zz"));
    }

    #[test]
    fn test_empty_category_is_none() {
        let params = SearchParams::from_query_string("q=&categoria=");
        assert_eq!(params, SearchParams::default());
    }

    #[test]
    fn test_label_and_subject() {
        assert_eq!(SearchParams::new().label(), "Todos os produtos");
        assert_eq!(SearchParams::new().with_query("xr").label(), "xr");
        let both = SearchParams::new().with_query("xr").with_category("iphone");
        assert_eq!(both.label(), "iphone");
        assert_eq!(both.subject(), "xr");
        assert_eq!(SearchParams::new().with_category("iphone").subject(), "iphone");
    }

    #[test]
    fn test_sort_is_stable() {
        let a = Product::new("a", "A", 2000.0);
        let b = Product::new("b", "B", 1000.0);
        let c = Product::new("c", "C", 2000.0);

        let mut list = vec![&a, &b, &c];
        SortOption::PriceAsc.apply(&mut list);
        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        SortOption::PriceDesc.apply(&mut list);
        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);

        let mut list = vec![&a, &b, &c];
        SortOption::Relevance.apply(&mut list);
        assert_eq!(list[1].id.as_str(), "b");
    }
}
