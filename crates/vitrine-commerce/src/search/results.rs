//! Search results and the status line shown above them.

use serde::Serialize;

use crate::catalog::Product;
use crate::search::query::SortOption;
use crate::search::selection::FilterPill;

/// What the results area should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    Loading,
    Error,
    /// Nothing matched; `message` explains why.
    Empty { message: String, can_clear_filters: bool },
    Results { count: usize },
}

impl SearchStatus {
    /// Empty-state status for the given inputs.
    pub fn empty(has_active_filters: bool, subject: &str) -> Self {
        let message = if has_active_filters {
            "Nenhum produto encontrado com os filtros selecionados".to_string()
        } else {
            format!("Nenhum produto encontrado para \"{}\"", subject)
        };
        SearchStatus::Empty {
            message,
            can_clear_filters: has_active_filters,
        }
    }

    /// Line under the heading: "Carregando..." or "{n} produtos".
    pub fn summary(&self) -> String {
        match self {
            SearchStatus::Loading => "Carregando...".to_string(),
            SearchStatus::Error => "Erro ao carregar produtos".to_string(),
            SearchStatus::Empty { .. } => count_label(0),
            SearchStatus::Results { count } => count_label(*count),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStatus::Loading)
    }
}

/// "{n} produtos".
pub fn count_label(count: usize) -> String {
    format!("{} produtos", count)
}

/// A rendered page of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<'a> {
    /// Heading: category, query, or "Todos os produtos".
    pub label: String,
    pub status: SearchStatus,
    pub sort: SortOption,
    pub active_filters: Vec<FilterPill>,
    pub items: Vec<&'a Product>,
}

impl<'a> SearchResults<'a> {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
