//! Best-seller ranking for the home page and product page carousels.

use crate::catalog::Product;
use crate::ids::ProductId;

/// Default number of products in a best-seller strip.
pub const BEST_SELLERS_LIMIT: usize = 8;

/// Top `limit` products by popularity, most popular first.
///
/// `exclude` drops the product currently being viewed. Ties keep catalog order.
pub fn best_sellers<'p>(
    products: &'p [Product],
    exclude: Option<&ProductId>,
    limit: usize,
) -> Vec<&'p Product> {
    let mut ranked: Vec<&Product> = products
        .iter()
        .filter(|p| exclude != Some(&p.id))
        .collect();
    ranked.sort_by(|a, b| b.popularity_score().total_cmp(&a.popularity_score()));
    ranked.truncate(limit);
    ranked
}
