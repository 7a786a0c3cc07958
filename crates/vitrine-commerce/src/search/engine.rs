//! The search page state: products, parameters, selection and cached results.

use crate::catalog::Product;
use crate::search::extract::{FacetExtractor, SmartphoneExtractor};
use crate::search::facets::{AvailableFacets, FacetGroup};
use crate::search::filter::FilterEvaluator;
use crate::search::index::MatchIndex;
use crate::search::query::{SearchParams, SortOption};
use crate::search::results::{SearchResults, SearchStatus};
use crate::search::selection::{FilterSelection, SelectedValue};

/// Faceted search over one product list.
///
/// Every input change marks the filtered positions stale; they are recomputed
/// on the next read. Facets are re-derived only when the product list changes,
/// so they always describe the whole list rather than the filtered subset.
#[derive(Debug)]
pub struct SearchEngine<E: FacetExtractor = SmartphoneExtractor> {
    extractor: E,
    products: Option<Vec<Product>>,
    loading: bool,
    error: Option<String>,
    params: SearchParams,
    selection: FilterSelection,
    facets: AvailableFacets,
    index: MatchIndex,
    generation: u64,
    positions: Vec<usize>,
    stale: bool,
}

impl SearchEngine<SmartphoneExtractor> {
    pub fn new() -> Self {
        Self::with_extractor(SmartphoneExtractor::default())
    }
}

impl Default for SearchEngine<SmartphoneExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FacetExtractor> SearchEngine<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            products: None,
            loading: false,
            error: None,
            params: SearchParams::default(),
            selection: FilterSelection::default(),
            facets: AvailableFacets::default(),
            index: MatchIndex::new(),
            generation: 0,
            positions: Vec::new(),
            stale: true,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Replace the product list. `None` means the list is not available.
    pub fn set_products(&mut self, products: Option<Vec<Product>>) {
        self.facets = AvailableFacets::derive(&self.extractor, products.as_deref());
        self.products = products;
        self.generation += 1;
        self.loading = false;
        self.stale = true;
    }

    pub fn products(&self) -> &[Product] {
        self.products.as_deref().unwrap_or(&[])
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        if params != self.params {
            self.params = params;
            self.stale = true;
        }
    }

    pub fn set_query(&mut self, q: impl Into<String>) {
        let params = self.params.clone().with_query(q);
        self.set_params(params);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let params = self.params.clone().with_category(category);
        self.set_params(params);
    }

    /// Sorting is applied on read and does not invalidate the filtered set.
    pub fn set_sort(&mut self, sort: SortOption) {
        self.params.sort = sort;
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Toggle one facet value. Returns whether it is now selected.
    pub fn toggle(&mut self, value: SelectedValue) -> bool {
        self.stale = true;
        self.selection.toggle(value)
    }

    pub fn remove(&mut self, value: &SelectedValue) -> bool {
        let removed = self.selection.remove(value);
        self.stale |= removed;
        removed
    }

    pub fn clear_filters(&mut self) {
        if self.selection.has_active() {
            self.selection.clear();
            self.stale = true;
        }
    }

    pub fn facets(&self) -> &AvailableFacets {
        &self.facets
    }

    /// Picker groups with the current selection marked.
    pub fn facet_groups(&self) -> Vec<FacetGroup> {
        self.facets.groups(&self.selection)
    }

    /// Heading for the results.
    pub fn label(&self) -> &str {
        self.params.label()
    }

    fn refresh(&mut self) {
        if !self.stale {
            return;
        }

        let products = self.products.as_deref().unwrap_or(&[]);
        let evaluator = FilterEvaluator::new(&self.extractor, &self.params, &self.selection);
        self.positions = self.index.filter_positions(self.generation, &evaluator, products);
        self.stale = false;

        tracing::debug!(
            products = products.len(),
            matched = self.positions.len(),
            active_filters = self.selection.active_count(),
            query = %self.params.q,
            "recomputed search results"
        );
    }

    /// Filtered products in the current sort order.
    pub fn results(&mut self) -> Vec<&Product> {
        self.refresh();
        let products = self.products.as_deref().unwrap_or(&[]);
        let mut items: Vec<&Product> = self.positions.iter().map(|&i| &products[i]).collect();
        self.params.sort.apply(&mut items);
        items
    }

    pub fn result_count(&mut self) -> usize {
        self.refresh();
        self.positions.len()
    }

    pub fn status(&mut self) -> SearchStatus {
        if self.loading {
            return SearchStatus::Loading;
        }
        if self.error.is_some() {
            return SearchStatus::Error;
        }
        match self.result_count() {
            0 => SearchStatus::empty(self.selection.has_active(), self.params.subject()),
            count => SearchStatus::Results { count },
        }
    }

    /// Everything the results area renders.
    pub fn page(&mut self) -> SearchResults<'_> {
        let status = self.status();
        let label = self.label().to_string();
        let sort = self.params.sort;
        let active_filters = self.selection.pills();
        let items = if status.is_terminal() && self.error.is_none() {
            self.results()
        } else {
            Vec::new()
        };
        SearchResults {
            label,
            status,
            sort,
            active_filters,
            items,
        }
    }
}
