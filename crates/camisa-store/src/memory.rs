//! In-process backend implementing every store trait.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::{public_url, relative_asset_path, upload_path};
use crate::auth::{AdminSession, PasswordHasher, SessionToken};
use crate::records::{
    CategoryRecord, NewProduct, ProductChanges, ProductRecord, ProductWithCategory,
    UNKNOWN_CATEGORY_NAME,
};
use crate::repository::{AssetStorage, AuthProvider, ProductRepository, StoreResult};
use crate::StoreError;

const DEFAULT_BASE_URL: &str = "http://localhost:54321";

/// Serialized contents of a store, as loaded from a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "categorias", default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(rename = "productos", default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Default)]
struct Inner {
    categories: Vec<CategoryRecord>,
    products: Vec<ProductRecord>,
    assets: HashMap<String, Vec<u8>>,
    accounts: HashMap<String, String>,
    sessions: HashMap<SessionToken, AdminSession>,
    next_id: u64,
}

impl Inner {
    /// Next id not already taken by a seeded row.
    fn next_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}-{:04}", prefix, self.next_id);
            let taken = self.products.iter().any(|p| p.id == id)
                || self.categories.iter().any(|c| c.id == id);
            if !taken {
                return id;
            }
        }
    }

    fn category_by_slug(&self, slug: &str) -> Option<&CategoryRecord> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

/// Thread-safe in-memory store.
///
/// Shares data behind a `RwLock` so one instance can back the catalog, the
/// admin CRUD and auth at once.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    base_url: String,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the base URL used for public asset links.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Inner {
                categories: snapshot.categories,
                products: snapshot.products,
                ..Default::default()
            }),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a store from snapshot JSON.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Register a category and return it.
    pub fn add_category(
        &self,
        name: impl Into<String>,
        slug: impl Into<String>,
        position: i32,
    ) -> StoreResult<CategoryRecord> {
        let mut inner = self.write()?;
        let record = CategoryRecord {
            id: inner.next_id("cat"),
            name: name.into(),
            slug: slug.into(),
            description: None,
            image_url: None,
            icon: None,
            position,
            created_at: Utc::now(),
        };
        inner.categories.push(record.clone());
        Ok(record)
    }

    /// Register an admin account.
    pub fn register_admin(&self, email: &str, password: &str) -> StoreResult<()> {
        let hash = PasswordHasher::new().hash(password)?;
        self.write()?.accounts.insert(email.to_lowercase(), hash);
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn newest_first<'a>(rows: impl Iterator<Item = &'a ProductRecord>) -> Vec<ProductRecord> {
        let mut rows: Vec<ProductRecord> = rows.cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<ProductRecord>> {
        Ok(Self::newest_first(self.read()?.products.iter()))
    }

    async fn fetch_by_category(&self, slug: &str) -> StoreResult<Vec<ProductRecord>> {
        let inner = self.read()?;
        let Some(category) = inner.category_by_slug(slug) else {
            tracing::debug!(slug, "unknown category slug");
            return Ok(Vec::new());
        };
        Ok(Self::newest_first(
            inner.products.iter().filter(|p| p.category_id == category.id),
        ))
    }

    async fn fetch_by_id(&self, id: &str) -> StoreResult<Option<ProductRecord>> {
        Ok(self.read()?.products.iter().find(|p| p.id == id).cloned())
    }

    async fn fetch_on_sale(&self) -> StoreResult<Vec<ProductRecord>> {
        Ok(Self::newest_first(
            self.read()?.products.iter().filter(|p| p.on_sale),
        ))
    }

    async fn fetch_new(&self) -> StoreResult<Vec<ProductRecord>> {
        Ok(Self::newest_first(
            self.read()?.products.iter().filter(|p| p.is_new),
        ))
    }

    async fn fetch_categories(&self) -> StoreResult<Vec<CategoryRecord>> {
        let mut categories = self.read()?.categories.clone();
        categories.sort_by_key(|c| c.position);
        Ok(categories)
    }

    async fn fetch_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>> {
        Ok(self.read()?.category_by_slug(slug).cloned())
    }

    async fn fetch_all_with_category(&self) -> StoreResult<Vec<ProductWithCategory>> {
        let inner = self.read()?;
        let names: HashMap<&str, &str> = inner
            .categories
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();

        Ok(Self::newest_first(inner.products.iter())
            .into_iter()
            .map(|product| {
                let category_name = names
                    .get(product.category_id.as_str())
                    .copied()
                    .unwrap_or(UNKNOWN_CATEGORY_NAME)
                    .to_string();
                ProductWithCategory {
                    product,
                    category_name,
                }
            })
            .collect())
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<ProductRecord> {
        let mut inner = self.write()?;
        let id = inner.next_id("prod");
        let record = product.into_record(id, Utc::now());
        inner.products.push(record.clone());
        tracing::info!(id = %record.id, name = %record.name, "product created");
        Ok(record)
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<ProductRecord> {
        let mut inner = self.write()?;
        let record = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        changes.apply_to(record, Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.write()?;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStorage for MemoryStore {
    async fn upload_asset(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        target_name: Option<&str>,
    ) -> StoreResult<String> {
        let path = upload_path(file_name, target_name, Utc::now());
        self.write()?.assets.insert(path.clone(), bytes);
        Ok(public_url(&self.base_url, &path))
    }

    async fn delete_asset(&self, path_or_url: &str) -> StoreResult<()> {
        let path = relative_asset_path(path_or_url);
        if self.write()?.assets.remove(&path).is_none() {
            // Missing objects are logged, not surfaced.
            tracing::warn!(path = %path, "asset to delete was not found");
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for MemoryStore {
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AdminSession> {
        let email = email.to_lowercase();
        let hash = self
            .read()?
            .accounts
            .get(&email)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;

        if !PasswordHasher::new().verify(password, &hash)? {
            return Err(StoreError::InvalidCredentials);
        }

        let session = AdminSession::start(email, Utc::now());
        self.write()?
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_out(&self, token: &SessionToken) -> StoreResult<()> {
        self.write()?.sessions.remove(token);
        Ok(())
    }

    async fn verify_session(&self, token: &SessionToken) -> StoreResult<bool> {
        let now: DateTime<Utc> = Utc::now();
        let mut inner = self.write()?;
        match inner.sessions.get(token).map(|s| s.is_expired_at(now)) {
            Some(true) => {
                inner.sessions.remove(token);
                Ok(false)
            }
            Some(false) => Ok(true),
            None => Ok(false),
        }
    }
}
