//! Subcategory counts for the filter sidebar.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Number of products tagged with one subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryCount {
    pub name: String,
    pub count: usize,
}

/// Count products per subcategory, in the order of `names`.
///
/// A product tagged with several subcategories counts once in each.
pub fn subcategory_counts<S: AsRef<str>>(products: &[Product], names: &[S]) -> Vec<SubcategoryCount> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            SubcategoryCount {
                name: name.to_string(),
                count: products.iter().filter(|p| p.in_subcategory(name)).count(),
            }
        })
        .collect()
}
