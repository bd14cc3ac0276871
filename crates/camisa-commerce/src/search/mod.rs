//! Search module.
//!
//! Contains the filter state, the filter-sort pipeline and subcategory counts.

mod facets;
mod filter;
mod pipeline;

pub use facets::{subcategory_counts, SubcategoryCount};
pub use filter::{FilterState, SortMode};
pub use pipeline::{apply, apply_with, sort_products};
