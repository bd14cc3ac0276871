//! Catalog module.
//!
//! Contains the product model, the store-record mapper and the category taxonomy.

mod category;
mod product;

pub use category::{Category, SubcategoryTaxonomy};
pub use product::{case_key, collation_key, Product};
