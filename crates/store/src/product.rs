use std::path::PathBuf;
use std::sync::Arc;

use tienda_core::{NewProduct, Product, ProductId, ProductUpdate, StoreError};
use tokio::sync::Mutex;

use crate::document::{load_collection, save_collection};
use crate::warnings::{TracingWarningSink, WarningSink};

const COLLECTION: &str = "products";

/// File-backed product collection. Every operation runs a full
/// load–mutate–save cycle against the document at `path`; nothing is cached
/// between calls. Mutating operations serialize on `write_guard` so
/// concurrent requests cannot interleave their cycles and lose updates.
pub struct ProductStore {
    path: PathBuf,
    warnings: Arc<dyn WarningSink>,
    write_guard: Mutex<()>,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_warning_sink(path, Arc::new(TracingWarningSink))
    }

    pub fn with_warning_sink(path: impl Into<PathBuf>, warnings: Arc<dyn WarningSink>) -> Self {
        Self { path: path.into(), warnings, write_guard: Mutex::new(()) }
    }

    async fn load(&self) -> Vec<Product> {
        load_collection(&self.path, COLLECTION, self.warnings.as_ref()).await
    }

    async fn save(&self, products: &[Product]) {
        save_collection(&self.path, products, COLLECTION, self.warnings.as_ref()).await;
    }

    /// Returns the collection in document order, truncated to the first
    /// `limit` entries when a limit is supplied. The raw query text is
    /// validated here: anything that is not a positive integer is rejected.
    pub async fn list(&self, limit: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let products = self.load().await;

        let Some(raw) = limit else {
            return Ok(products);
        };

        let limit = raw
            .parse::<usize>()
            .ok()
            .filter(|value| *value >= 1)
            .ok_or_else(|| {
                StoreError::Validation("limit must be a positive integer".to_string())
            })?;

        Ok(products.into_iter().take(limit).collect())
    }

    pub async fn find(&self, id: &str) -> Result<Product, StoreError> {
        self.load()
            .await
            .into_iter()
            .find(|product| product.id.matches(id))
            .ok_or(StoreError::NotFound("product"))
    }

    /// Validates the draft, assigns `max(existing ids) + 1` (or 1 for an
    /// empty collection), appends, and persists. Max-based assignment keeps
    /// ids unique across deletions.
    pub async fn create(&self, draft: NewProduct) -> Result<Product, StoreError> {
        let _guard = self.write_guard.lock().await;
        let mut products = self.load().await;

        let next_id =
            ProductId(products.iter().map(|product| product.id.0).max().unwrap_or(0) + 1);
        let created = draft.into_product(next_id)?;

        products.push(created.clone());
        self.save(&products).await;

        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: ProductUpdate) -> Result<Product, StoreError> {
        let _guard = self.write_guard.lock().await;
        let mut products = self.load().await;

        let product = products
            .iter_mut()
            .find(|product| product.id.matches(id))
            .ok_or(StoreError::NotFound("product"))?;
        product.apply(patch);
        let updated = product.clone();

        self.save(&products).await;

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().await;
        let mut products = self.load().await;

        let before = products.len();
        products.retain(|product| !product.id.matches(id));
        if products.len() == before {
            return Err(StoreError::NotFound("product"));
        }

        self.save(&products).await;

        Ok(())
    }
}
