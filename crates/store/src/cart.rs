use std::path::PathBuf;
use std::sync::Arc;

use tienda_core::{Cart, CartId, StoreError};
use tokio::sync::Mutex;

use crate::document::{load_collection, save_collection};
use crate::warnings::{TracingWarningSink, WarningSink};

const COLLECTION: &str = "carts";

/// File-backed cart collection, same load–mutate–save discipline as
/// `ProductStore`. Cart ids are assigned from the collection length, not the
/// max existing id; carts have no delete operation, so the two schemes never
/// diverge in practice.
pub struct CartStore {
    path: PathBuf,
    warnings: Arc<dyn WarningSink>,
    write_guard: Mutex<()>,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_warning_sink(path, Arc::new(TracingWarningSink))
    }

    pub fn with_warning_sink(path: impl Into<PathBuf>, warnings: Arc<dyn WarningSink>) -> Self {
        Self { path: path.into(), warnings, write_guard: Mutex::new(()) }
    }

    async fn load(&self) -> Vec<Cart> {
        load_collection(&self.path, COLLECTION, self.warnings.as_ref()).await
    }

    async fn save(&self, carts: &[Cart]) {
        save_collection(&self.path, carts, COLLECTION, self.warnings.as_ref()).await;
    }

    /// Creates an empty cart with `id = collection length + 1`.
    pub async fn create(&self) -> Cart {
        let _guard = self.write_guard.lock().await;
        let mut carts = self.load().await;

        let cart = Cart::new(CartId(carts.len() as u64 + 1));
        carts.push(cart.clone());
        self.save(&carts).await;

        cart
    }

    pub async fn find(&self, id: &str) -> Result<Cart, StoreError> {
        self.load()
            .await
            .into_iter()
            .find(|cart| cart.id.matches(id))
            .ok_or(StoreError::NotFound("cart"))
    }

    /// Appends a `{product, quantity: 1}` line item to the cart. The product
    /// id is recorded as supplied and repeat appends are kept as separate
    /// line items.
    pub async fn add_product(&self, cart_id: &str, product_id: &str) -> Result<Cart, StoreError> {
        let _guard = self.write_guard.lock().await;
        let mut carts = self.load().await;

        let cart = carts
            .iter_mut()
            .find(|cart| cart.id.matches(cart_id))
            .ok_or(StoreError::NotFound("cart"))?;
        cart.push_line_item(product_id);
        let updated = cart.clone();

        self.save(&carts).await;

        Ok(updated)
    }
}
