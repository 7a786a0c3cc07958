//! Condition codes and the home-page grouping built on them.

use serde::Serialize;

use crate::catalog::Product;

/// Known condition codes in display priority, with their section titles.
pub const CONDITION_SECTIONS: &[(&str, &str)] = &[
    ("novo", "Novos"),
    ("seminovo", "Seminovos"),
    ("usado_excelente", "Usado - Excelente"),
    ("usado_bom", "Usado - Bom"),
    ("recondicionado", "Recondicionados"),
    ("com_defeito", "Com Defeito"),
];

/// A home-page section listing products of one condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSection {
    /// Raw condition code.
    pub code: String,
    /// Section title.
    pub title: String,
}

/// Section title for a condition code; unknown codes are shown as-is.
pub fn condition_title(code: &str) -> &str {
    CONDITION_SECTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, title)| *title)
        .unwrap_or(code)
}

fn priority(code: &str) -> usize {
    CONDITION_SECTIONS
        .iter()
        .position(|(c, _)| *c == code)
        .unwrap_or(999)
}

/// Distinct condition codes present in `products`, known codes first in
/// priority order, unknown codes after them in encounter order.
pub fn condition_sections(products: &[Product]) -> Vec<ConditionSection> {
    let mut codes: Vec<&str> = Vec::new();
    for code in products.iter().filter_map(|p| p.condition.as_deref()) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes.sort_by_key(|code| priority(code));

    codes
        .into_iter()
        .map(|code| ConditionSection {
            code: code.to_string(),
            title: condition_title(code).to_string(),
        })
        .collect()
}
