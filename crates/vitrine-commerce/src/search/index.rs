//! Memoized per-value match masks over the current product list.

use std::collections::HashMap;

use crate::catalog::Product;
use crate::search::extract::FacetExtractor;
use crate::search::filter::{value_matches, Clause, FilterEvaluator};
use crate::search::selection::{FacetKind, SelectedValue};

/// Facet value → which product positions it matches.
///
/// Masks are computed on first use and kept while the caller passes the same
/// list generation, so toggling a value back on costs nothing. Callers bump
/// the generation whenever the product list is replaced.
#[derive(Debug, Default)]
pub struct MatchIndex {
    masks: HashMap<SelectedValue, Vec<bool>>,
    generation: Option<u64>,
    product_count: usize,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every mask.
    pub fn reset(&mut self) {
        self.masks.clear();
        self.generation = None;
        self.product_count = 0;
    }

    /// Number of cached masks.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    fn mask<E: FacetExtractor + ?Sized>(
        &mut self,
        extractor: &E,
        products: &[Product],
        value: &SelectedValue,
    ) -> &[bool] {
        self.masks.entry(value.clone()).or_insert_with(|| {
            tracing::trace!(?value, "building match mask");
            products
                .iter()
                .map(|p| value_matches(extractor, p, value))
                .collect()
        })
    }

    /// Positions passing `evaluator`, using cached masks for facet clauses.
    ///
    /// `generation` identifies the product list. A generation or length
    /// different from the previous call drops every mask first.
    pub fn filter_positions<E: FacetExtractor + ?Sized>(
        &mut self,
        generation: u64,
        evaluator: &FilterEvaluator<'_, E>,
        products: &[Product],
    ) -> Vec<usize> {
        if self.generation != Some(generation) || self.product_count != products.len() {
            if !self.masks.is_empty() {
                tracing::trace!(generation, "product list changed, dropping match masks");
            }
            self.reset();
            self.generation = Some(generation);
            self.product_count = products.len();
        }

        let scanned: Vec<Clause> = [Clause::Category, Clause::Text]
            .into_iter()
            .filter(|c| evaluator.is_active(*c))
            .collect();
        let mut keep: Vec<bool> = products
            .iter()
            .map(|p| evaluator.matches_in_order(&scanned, p))
            .collect();

        for kind in FacetKind::ALL {
            if !evaluator.is_active(Clause::Facet(kind)) {
                continue;
            }

            let values = evaluator.selected(kind);
            let mut any = vec![false; products.len()];
            for value in values {
                let mask = self.mask(evaluator.extractor(), products, value);
                for (slot, hit) in any.iter_mut().zip(mask) {
                    *slot |= *hit;
                }
            }
            for (slot, hit) in keep.iter_mut().zip(any) {
                *slot &= hit;
            }
        }

        keep.iter()
            .enumerate()
            .filter(|(_, k)| **k)
            .map(|(i, _)| i)
            .collect()
    }
}
