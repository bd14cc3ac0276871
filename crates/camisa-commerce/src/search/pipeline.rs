//! Filter-sort pipeline turning a raw list into a displayed list.
//!
//! Steps run in a fixed order: subcategory, sizes, search, sort. Filters AND
//! together; selected sizes OR among themselves. The input is never mutated.

use std::collections::BTreeSet;

use crate::catalog::{case_key, Product};
use crate::search::{FilterState, SortMode};

/// Apply the filter state to a product list.
pub fn apply(products: &[Product], filters: &FilterState) -> Vec<Product> {
    apply_with(
        products,
        &filters.selected_sizes,
        filters.active_subcategory.as_deref(),
        &filters.search_term,
        filters.sort,
    )
}

/// Spelled-out form of [`apply`].
pub fn apply_with(
    products: &[Product],
    sizes: &BTreeSet<String>,
    active_subcategory: Option<&str>,
    search_term: &str,
    sort: SortMode,
) -> Vec<Product> {
    let subcategory = active_subcategory.filter(|s| !s.is_empty());
    let term = search_term.trim().to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| subcategory.map_or(true, |s| p.in_subcategory(s)))
        .filter(|p| sizes.is_empty() || p.sizes.iter().any(|s| sizes.contains(s)))
        .filter(|p| term.is_empty() || matches_term(p, &term))
        .cloned()
        .collect();

    sort_products(&mut result, sort);
    result
}

/// Stable in-place sort by mode.
pub fn sort_products(products: &mut [Product], sort: SortMode) {
    match sort {
        SortMode::NameAsc => {
            products.sort_by_cached_key(|p| (p.collation_key(), case_key(&p.name)));
        }
        SortMode::Newness => products.sort_by_key(|p| !p.is_new),
        SortMode::Offers => products.sort_by_key(|p| !p.on_sale),
        SortMode::None => {}
    }
}

fn matches_term(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
        || product.colors.iter().any(|c| c.to_lowercase().contains(term))
}
