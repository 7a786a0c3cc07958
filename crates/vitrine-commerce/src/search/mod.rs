//! Search module.
//!
//! Facet derivation, selection state, filter evaluation and the search page
//! engine that ties them together.

mod engine;
mod extract;
mod facets;
mod filter;
mod index;
mod price_band;
mod query;
mod ranking;
mod results;
mod selection;

pub use engine::SearchEngine;
pub use extract::{FacetExtractor, SmartphoneExtractor, COLOR_CODES, FALLBACK_COLOR_CODE};
pub use facets::{AvailableFacets, ColorFacetValue, FacetGroup, FacetOption, FacetValue};
pub use filter::{value_matches, Clause, FilterEvaluator};
pub use index::MatchIndex;
pub use price_band::{PriceBand, PRICE_BANDS};
pub use query::{SearchParams, SortOption};
pub use ranking::{best_sellers, BEST_SELLERS_LIMIT};
pub use results::{count_label, SearchResults, SearchStatus};
pub use selection::{FacetKind, FilterPill, FilterSelection, SelectedValue};
