//! Backend traits consumed by the catalog.
//!
//! Any hosted table/storage/auth service that implements these is substitutable
//! without touching the catalog engine.

use async_trait::async_trait;

use crate::auth::{AdminSession, SessionToken};
use crate::records::{CategoryRecord, NewProduct, ProductChanges, ProductRecord, ProductWithCategory};
use crate::StoreError;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Table access for products and categories.
///
/// Listing methods return rows newest first (`created_at` descending).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products.
    async fn fetch_all(&self) -> StoreResult<Vec<ProductRecord>>;

    /// Products whose category has the given slug.
    ///
    /// An unknown slug yields an empty list, not an error.
    async fn fetch_by_category(&self, slug: &str) -> StoreResult<Vec<ProductRecord>>;

    /// A single product, `None` when absent.
    async fn fetch_by_id(&self, id: &str) -> StoreResult<Option<ProductRecord>>;

    /// Products flagged as on sale.
    async fn fetch_on_sale(&self) -> StoreResult<Vec<ProductRecord>>;

    /// Products flagged as new arrivals.
    async fn fetch_new(&self) -> StoreResult<Vec<ProductRecord>>;

    /// All categories ordered by their display position.
    async fn fetch_categories(&self) -> StoreResult<Vec<CategoryRecord>>;

    /// A category by slug, `None` when absent.
    async fn fetch_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>>;

    /// Admin listing with the category name joined in.
    async fn fetch_all_with_category(&self) -> StoreResult<Vec<ProductWithCategory>>;

    /// Insert a product and return the stored row.
    async fn insert(&self, product: NewProduct) -> StoreResult<ProductRecord>;

    /// Update a product and return the stored row.
    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<ProductRecord>;

    /// Delete a product by id.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Object storage for product images.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Upload an image and return its public URL.
    ///
    /// `target_name` overrides the generated object name.
    async fn upload_asset(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        target_name: Option<&str>,
    ) -> StoreResult<String>;

    /// Remove an image given its public URL or relative name.
    async fn delete_asset(&self, path_or_url: &str) -> StoreResult<()>;
}

/// Admin authentication.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AdminSession>;

    /// Invalidate a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &SessionToken) -> StoreResult<()>;

    /// Whether the token belongs to a live session.
    async fn verify_session(&self, token: &SessionToken) -> StoreResult<bool>;
}
