//! End-to-end catalog flow against the in-memory store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use camisa_commerce::controller::LOAD_ERROR_MESSAGE;
use camisa_commerce::ids::ProductId;
use camisa_commerce::prelude::*;
use camisa_store::{
    BackoffStrategy, CategoryRecord, MemoryStore, NewProduct, ProductChanges, ProductRecord,
    ProductRepository, ProductWithCategory, RetryPolicy, StoreError, StoreResult,
};

/// Delegates to a `MemoryStore` but fails category fetches for one slug.
///
/// With a gate set, every category fetch first waits for a notification.
struct FlakyRepository {
    inner: MemoryStore,
    failing_slug: String,
    remaining_failures: AtomicU32,
    gate: Option<Arc<Notify>>,
}

impl FlakyRepository {
    fn new(inner: MemoryStore, failing_slug: &str, failures: u32) -> Self {
        Self {
            inner,
            failing_slug: failing_slug.to_string(),
            remaining_failures: AtomicU32::new(failures),
            gate: None,
        }
    }

    fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn heal(&self) {
        self.remaining_failures.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductRepository for FlakyRepository {
    async fn fetch_all(&self) -> StoreResult<Vec<ProductRecord>> {
        self.inner.fetch_all().await
    }

    async fn fetch_by_category(&self, slug: &str) -> StoreResult<Vec<ProductRecord>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if slug == self.failing_slug {
            let left = self.remaining_failures.load(Ordering::SeqCst);
            if left > 0 {
                self.remaining_failures.store(left - 1, Ordering::SeqCst);
                return Err(StoreError::Unavailable("connection reset".into()));
            }
        }
        self.inner.fetch_by_category(slug).await
    }

    async fn fetch_by_id(&self, id: &str) -> StoreResult<Option<ProductRecord>> {
        self.inner.fetch_by_id(id).await
    }

    async fn fetch_on_sale(&self) -> StoreResult<Vec<ProductRecord>> {
        self.inner.fetch_on_sale().await
    }

    async fn fetch_new(&self) -> StoreResult<Vec<ProductRecord>> {
        self.inner.fetch_new().await
    }

    async fn fetch_categories(&self) -> StoreResult<Vec<CategoryRecord>> {
        self.inner.fetch_categories().await
    }

    async fn fetch_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>> {
        self.inner.fetch_category_by_slug(slug).await
    }

    async fn fetch_all_with_category(&self) -> StoreResult<Vec<ProductWithCategory>> {
        self.inner.fetch_all_with_category().await
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<ProductRecord> {
        self.inner.insert(product).await
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<ProductRecord> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.inner.delete(id).await
    }
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let replicas = store.add_category("Replicas", "replicas", 1).unwrap();
    let printed = store.add_category("Camisas Estampadas", "estampadas", 2).unwrap();
    let embroidered = store.add_category("Camisas Bordadas", "bordadas", 3).unwrap();

    let rows = [
        NewProduct::new("Seleccion Mexicana 2026", "mx.jpg", replicas.id.clone())
            .with_sizes(&["M", "L"])
            .with_colors(&["Verde"])
            .with_subcategories(&["Selecciones Nacionales"]),
        NewProduct::new("Camisa Rock Vintage", "rock.jpg", printed.id.clone())
            .with_sizes(&["S", "M"])
            .with_colors(&["Negro"])
            .with_subcategories(&["Bandas de Rock"]),
        NewProduct::new("Logo Empresarial Azul", "logo.jpg", embroidered.id.clone())
            .with_sizes(&["L"])
            .with_colors(&["Azul"])
            .with_subcategories(&["Logos Empresariales", "Uniformes"])
            .on_sale(),
    ];
    for row in rows {
        store.insert(row).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_partial_failure_keeps_other_sections() {
    let repository = Arc::new(FlakyRepository::new(seeded_store().await, "estampadas", u32::MAX));
    let mut catalog = CatalogController::new(Arc::clone(&repository));

    assert_eq!(catalog.load_all().await, 2);

    assert_eq!(catalog.error(Category::Printed), Some(LOAD_ERROR_MESSAGE));
    assert!(catalog.raw(Category::Printed).is_empty());
    assert_eq!(catalog.last_error(), Some(LOAD_ERROR_MESSAGE));

    assert_eq!(catalog.error(Category::Replicas), None);
    assert_eq!(catalog.filtered(Category::Replicas).len(), 1);
    assert_eq!(catalog.error(Category::Embroidered), None);
    let counts = catalog.subcategory_counts(Category::Embroidered);
    assert_eq!(counts.iter().filter(|c| c.count == 1).count(), 2);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_list() {
    let repository = Arc::new(FlakyRepository::new(seeded_store().await, "estampadas", 0));
    let mut catalog = CatalogController::new(Arc::clone(&repository));
    assert!(catalog.load(Category::Printed).await);
    let loaded = catalog.raw(Category::Printed).to_vec();

    repository.remaining_failures.store(1, Ordering::SeqCst);
    assert!(!catalog.load(Category::Printed).await);
    assert_eq!(catalog.raw(Category::Printed), loaded.as_slice());
    assert!(catalog.error(Category::Printed).is_some());

    repository.heal();
    assert!(catalog.load(Category::Printed).await);
    assert_eq!(catalog.error(Category::Printed), None);
}

#[tokio::test]
async fn test_loading_flag_set_while_fetch_in_flight() {
    let gate = Arc::new(Notify::new());
    let repository = FlakyRepository::new(seeded_store().await, "estampadas", 0)
        .with_gate(Arc::clone(&gate));
    let mut catalog = CatalogController::new(Arc::new(repository));

    let mut fetch = Box::pin(catalog.start_load(Category::Printed));
    assert!(futures::poll!(&mut fetch).is_pending());
    assert!(catalog.is_loading(Category::Printed));
    assert!(!catalog.is_loading(Category::Replicas));
    assert!(catalog.raw(Category::Printed).is_empty());

    gate.notify_one();
    let outcome = fetch.await;
    assert!(catalog.finish_load(Category::Printed, outcome));
    assert!(!catalog.is_loading(Category::Printed));
    assert_eq!(catalog.raw(Category::Printed).len(), 1);
}

#[tokio::test]
async fn test_retry_policy_absorbs_transient_failures() {
    let repository = Arc::new(FlakyRepository::new(seeded_store().await, "bordadas", 2));
    let mut catalog = CatalogController::new(repository)
        .with_retry(RetryPolicy::new(2).with_backoff(BackoffStrategy::None));

    assert!(catalog.load(Category::Embroidered).await);
    assert_eq!(catalog.raw(Category::Embroidered).len(), 1);
}

#[tokio::test]
async fn test_browse_to_checkout() {
    let mut catalog = CatalogController::new(Arc::new(seeded_store().await));
    catalog.load_all().await;

    catalog.set_search_term("rock");
    let shirts = catalog.filtered(Category::Printed);
    assert_eq!(shirts.len(), 1);

    let mut cart = Cart::new();
    cart.add_item(&shirts[0], "M", "Negro", 1).unwrap();
    cart.add_item(&shirts[0], "M", "Negro", 1).unwrap();

    let summary = cart.order_summary().unwrap();
    assert!(summary.contains("*1. Camisa Rock Vintage*"));
    assert!(summary.contains("Cantidad: 2"));
    assert!(cart
        .build_order_message()
        .starts_with("https://wa.me/523355550000?text=*PEDIDO%20-%20CamisaSTORE*%0A"));
}

#[tokio::test]
async fn test_bundled_fixture() {
    let store = MemoryStore::from_json(include_str!("../../../fixtures/catalog.json")).unwrap();
    let mut catalog = CatalogController::new(Arc::new(store));
    assert_eq!(catalog.load_all().await, 3);

    assert_eq!(catalog.raw(Category::Replicas).len(), 3);
    assert_eq!(catalog.raw(Category::Printed).len(), 4);
    assert_eq!(catalog.raw(Category::Embroidered).len(), 3);

    catalog.set_sort(SortMode::NameAsc);
    let ids: Vec<String> = catalog
        .filtered(Category::Printed)
        .into_iter()
        .map(|p| p.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["prod-0005", "prod-0004", "prod-0007", "prod-0006"]);

    let missing_description = catalog.find_by_id(&ProductId::new("prod-0003")).unwrap();
    assert_eq!(missing_description.description, "");
}
