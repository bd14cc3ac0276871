//! Catalog controller: raw lists per category, shared filters, derived views.
//!
//! Loads are the only async operations. Each one touches its own
//! [`CategorySlot`] plus the shared `last_error`, so a failed section never
//! disturbs the others. Derived views are recomputed on every read.

use std::future::Future;
use std::sync::Arc;

use camisa_store::{with_retry, ProductRepository, RetryPolicy, StoreResult};
use futures::future::join3;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product, SubcategoryTaxonomy};
use crate::ids::ProductId;
use crate::search::{self, FilterState, SortMode, SubcategoryCount};

/// Message shown when a section fails to load. The underlying fault is logged.
pub const LOAD_ERROR_MESSAGE: &str = "No se pudieron cargar los productos";

/// Load state of one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySlot {
    /// Last successfully loaded list.
    pub raw: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Displayed products plus sidebar counts for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub counts: Vec<SubcategoryCount>,
}

/// Derive a view from a raw list. Counts always cover the whole raw list.
pub fn recompute<S: AsRef<str>>(raw: &[Product], filters: &FilterState, names: &[S]) -> CatalogView {
    let products = search::apply(raw, filters);
    tracing::debug!(raw = raw.len(), shown = products.len(), "recomputed catalog view");
    CatalogView {
        products,
        counts: search::subcategory_counts(raw, names),
    }
}

/// Drives the three storefront sections against a product repository.
pub struct CatalogController<R: ProductRepository + ?Sized> {
    repository: Arc<R>,
    slots: [CategorySlot; 3],
    filters: FilterState,
    last_error: Option<String>,
    selected: Option<Product>,
    taxonomy: SubcategoryTaxonomy,
    retry: RetryPolicy,
}

impl<R: ProductRepository + ?Sized> CatalogController<R> {
    /// Create a controller with the default taxonomy and no retries.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            slots: Default::default(),
            filters: FilterState::default(),
            last_error: None,
            selected: None,
            taxonomy: SubcategoryTaxonomy::default(),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_taxonomy(mut self, taxonomy: SubcategoryTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load one category. Returns whether the fetch succeeded.
    pub async fn load(&mut self, category: Category) -> bool {
        self.slot_mut(category).loading = true;
        let repository = Arc::clone(&self.repository);
        let outcome = fetch_category(&*repository, &self.retry, category).await;
        self.finish_load(category, outcome)
    }

    /// Mark a category as loading and hand back its fetch.
    ///
    /// The fetch does not borrow the controller, so the loading flag can be
    /// rendered while it runs. Pass its output to [`finish_load`](Self::finish_load).
    pub fn start_load(
        &mut self,
        category: Category,
    ) -> impl Future<Output = StoreResult<Vec<Product>>> + 'static
    where
        R: 'static,
    {
        self.slot_mut(category).loading = true;
        let repository = Arc::clone(&self.repository);
        let retry = self.retry.clone();
        async move { fetch_category(&*repository, &retry, category).await }
    }

    /// Load all three categories concurrently.
    ///
    /// Returns the number of sections that loaded.
    pub async fn load_all(&mut self) -> usize {
        for slot in &mut self.slots {
            slot.loading = true;
        }

        let repository = Arc::clone(&self.repository);
        let (replicas, printed, embroidered) = join3(
            fetch_category(&*repository, &self.retry, Category::Replicas),
            fetch_category(&*repository, &self.retry, Category::Printed),
            fetch_category(&*repository, &self.retry, Category::Embroidered),
        )
        .await;

        [
            self.finish_load(Category::Replicas, replicas),
            self.finish_load(Category::Printed, printed),
            self.finish_load(Category::Embroidered, embroidered),
        ]
        .into_iter()
        .filter(|ok| *ok)
        .count()
    }

    /// Store a fetch outcome in its slot. Returns whether the fetch succeeded.
    ///
    /// On failure the previous raw list is kept.
    pub fn finish_load(&mut self, category: Category, outcome: StoreResult<Vec<Product>>) -> bool {
        let slot = self.slot_mut(category);
        slot.loading = false;
        match outcome {
            Ok(products) => {
                tracing::info!(category = %category, count = products.len(), "loaded products");
                slot.raw = products;
                slot.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "failed to load products");
                slot.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.last_error = Some(LOAD_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn slot(&self, category: Category) -> &CategorySlot {
        &self.slots[slot_index(category)]
    }

    fn slot_mut(&mut self, category: Category) -> &mut CategorySlot {
        &mut self.slots[slot_index(category)]
    }

    /// Unfiltered products of a category.
    pub fn raw(&self, category: Category) -> &[Product] {
        &self.slot(category).raw
    }

    pub fn is_loading(&self, category: Category) -> bool {
        self.slot(category).loading
    }

    pub fn error(&self, category: Category) -> Option<&str> {
        self.slot(category).error.as_deref()
    }

    /// Most recent load error across all categories.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn taxonomy(&self) -> &SubcategoryTaxonomy {
        &self.taxonomy
    }

    /// Filtered and sorted products of a category.
    pub fn filtered(&self, category: Category) -> Vec<Product> {
        search::apply(self.raw(category), &self.filters)
    }

    /// Subcategory counts over the raw list of a category.
    pub fn subcategory_counts(&self, category: Category) -> Vec<SubcategoryCount> {
        search::subcategory_counts(self.raw(category), self.taxonomy.names(category))
    }

    /// Full derived view of a category.
    pub fn view(&self, category: Category) -> CatalogView {
        recompute(self.raw(category), &self.filters, self.taxonomy.names(category))
    }

    pub fn toggle_size(&mut self, size: &str) {
        self.filters.toggle_size(size);
    }

    pub fn select_subcategory(&mut self, name: &str) {
        self.filters.select_subcategory(name);
    }

    pub fn clear_subcategory(&mut self) {
        self.filters.clear_subcategory();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.set_search_term(term);
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.filters.set_sort(sort);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Find a product in Replicas, then Printed, then Embroidered.
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        Category::ALL
            .iter()
            .find_map(|c| self.raw(*c).iter().find(|p| &p.id == id))
    }

    /// Select a product for the detail view. Returns false when it is unknown.
    pub fn select_product(&mut self, id: &ProductId) -> bool {
        self.selected = self.find_by_id(id).cloned();
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }
}

fn slot_index(category: Category) -> usize {
    match category {
        Category::Replicas => 0,
        Category::Printed => 1,
        Category::Embroidered => 2,
    }
}

async fn fetch_category<R: ProductRepository + ?Sized>(
    repository: &R,
    retry: &RetryPolicy,
    category: Category,
) -> StoreResult<Vec<Product>> {
    let records = with_retry(retry, || repository.fetch_by_category(category.slug())).await?;
    Ok(records
        .into_iter()
        .map(|record| Product::from_record(record, Some(category)))
        .collect())
}
