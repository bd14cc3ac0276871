//! Catalog, cart and checkout logic for the Camisa storefront.
//!
//! This crate holds the client-side engine of the store:
//!
//! - **Catalog**: products mapped from store records, categories, subcategory taxonomy
//! - **Search**: filter state, the filter-sort pipeline, subcategory counts
//! - **Cart**: line items merged by product, size and color; WhatsApp checkout link
//! - **Controller**: per-category loading and derived views over a repository
//!
//! # Example
//!
//! ```rust,ignore
//! use camisa_commerce::prelude::*;
//!
//! let mut catalog = CatalogController::new(Arc::new(store));
//! catalog.load_all().await;
//! catalog.toggle_size("M");
//! catalog.set_sort(SortMode::NameAsc);
//!
//! let shirts = catalog.filtered(Category::Printed);
//!
//! let mut cart = Cart::new();
//! cart.add_item(&shirts[0], "M", "Negro", 2)?;
//! println!("{}", cart.build_order_message());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod controller;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, SubcategoryTaxonomy};

    // Search
    pub use crate::search::{FilterState, SortMode, SubcategoryCount};

    // Cart
    pub use crate::cart::{Cart, CheckoutLink, LineItem};

    // Controller
    pub use crate::controller::{CatalogController, CatalogView, CategorySlot};
}
