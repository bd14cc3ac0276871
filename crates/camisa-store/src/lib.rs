//! Hosted store boundary for the Camisa catalog.
//!
//! The catalog engine never talks to the hosted backend directly. Everything it
//! consumes goes through the traits defined here:
//!
//! - **Records**: wire shapes of the `productos` / `categorias` tables
//! - **Repository**: `ProductRepository`, `AssetStorage`, `AuthProvider`
//! - **Retry**: bounded retry with backoff for fetches
//! - **Memory**: `MemoryStore`, an in-process backend for tests and the CLI
//!
//! # Example
//!
//! ```rust,ignore
//! use camisa_store::prelude::*;
//!
//! let store = MemoryStore::new();
//! let category = store.add_category("Camisas Estampadas", "estampadas", 2)?;
//! store.insert(NewProduct::new("Camisa Anime", "https://cdn/anime.jpg", category.id.clone())).await?;
//!
//! let rows = store.fetch_by_category("estampadas").await?;
//! ```

mod assets;
mod auth;
mod error;
mod memory;
mod records;
mod repository;
mod retry;

pub use assets::{public_url, relative_asset_path, upload_path, ASSET_BUCKET, ASSET_PREFIX};
pub use auth::{AdminSession, PasswordHasher, SessionToken, SESSION_DURATION_DAYS};
pub use error::StoreError;
pub use memory::{MemoryStore, Snapshot};
pub use records::{
    CategoryRecord, NewProduct, ProductChanges, ProductRecord, ProductWithCategory,
    UNKNOWN_CATEGORY_NAME,
};
pub use repository::{AssetStorage, AuthProvider, ProductRepository, StoreResult};
pub use retry::{with_retry, BackoffStrategy, RetryPolicy};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AdminSession, AssetStorage, AuthProvider, CategoryRecord, MemoryStore, NewProduct,
        ProductChanges, ProductRecord, ProductRepository, ProductWithCategory, RetryPolicy,
        SessionToken, StoreError, StoreResult,
    };
}
