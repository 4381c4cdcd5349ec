//! Product collection routes.
//!
//! Endpoints (mounted under `/api/products`):
//! - `GET    /`            — list products, optional `?limit=N` cap
//! - `GET    /{pid}`       — fetch one product by id
//! - `POST   /`            — create a product (validates required fields)
//! - `PUT    /{pid}`       — shallow-merge update, id is never changed
//! - `DELETE /{pid}`       — remove a product
//!
//! Store failures map onto the HTTP surface as `ValidationError` → 400 and
//! `NotFound` → 404, both with an `{"error": ...}` body.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tienda_core::{NewProduct, Product, ProductUpdate, StoreError};
use tienda_store::ProductStore;
use tracing::info;

#[derive(Clone)]
pub struct ProductsState {
    store: Arc<ProductStore>,
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn store_error_response(error: StoreError) -> Response {
    let status = match error {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse { error: error.to_string() })).into_response()
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(store: Arc<ProductStore>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{pid}", get(get_product).put(update_product).delete(delete_product))
        .with_state(ProductsState { store })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn list_products(
    State(state): State<ProductsState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.store.list(query.limit.as_deref()).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub async fn get_product(
    State(state): State<ProductsState>,
    Path(pid): Path<String>,
) -> Response {
    match state.store.find(&pid).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub async fn create_product(
    State(state): State<ProductsState>,
    Json(draft): Json<NewProduct>,
) -> Response {
    match state.store.create(draft).await {
        Ok(product) => {
            info!(
                event_name = "api.products.created",
                product_id = product.id.0,
                "product added"
            );
            let payload = ProductResponse {
                message: "product added successfully".to_string(),
                product,
            };
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub async fn update_product(
    State(state): State<ProductsState>,
    Path(pid): Path<String>,
    Json(patch): Json<ProductUpdate>,
) -> Response {
    match state.store.update(&pid, patch).await {
        Ok(product) => {
            info!(
                event_name = "api.products.updated",
                product_id = product.id.0,
                "product updated"
            );
            let payload =
                ProductResponse { message: "product updated".to_string(), product };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub async fn delete_product(
    State(state): State<ProductsState>,
    Path(pid): Path<String>,
) -> Response {
    match state.store.delete(&pid).await {
        Ok(()) => {
            info!(event_name = "api.products.deleted", product_id = %pid, "product deleted");
            let payload =
                MessageResponse { message: "product deleted successfully".to_string() };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}
