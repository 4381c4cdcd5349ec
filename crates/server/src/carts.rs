//! Cart collection routes.
//!
//! Endpoints (mounted under `/api/carts`):
//! - `POST /`                       — create an empty cart
//! - `GET  /{cid}`                  — fetch one cart by id
//! - `POST /{cid}/product/{pid}`    — append a line item for a product
//!
//! The product id in the append path is recorded verbatim; it is not checked
//! against the product collection.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tienda_core::{Cart, StoreError};
use tienda_store::CartStore;
use tracing::info;

#[derive(Clone)]
pub struct CartsState {
    store: Arc<CartStore>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: String,
    pub cart: Cart,
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

pub fn router(store: Arc<CartStore>) -> Router {
    Router::new()
        .route("/", post(create_cart))
        .route("/{cid}", get(get_cart))
        .route("/{cid}/product/{pid}", post(add_product))
        .with_state(CartsState { store })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn create_cart(State(state): State<CartsState>) -> Response {
    let cart = state.store.create().await;

    info!(event_name = "api.carts.created", cart_id = cart.id.0, "cart created");
    let payload = CartResponse { message: "cart created".to_string(), cart };
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub async fn get_cart(State(state): State<CartsState>, Path(cid): Path<String>) -> Response {
    match state.store.find(&cid).await {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub async fn add_product(
    State(state): State<CartsState>,
    Path((cid, pid)): Path<(String, String)>,
) -> Response {
    match state.store.add_product(&cid, &pid).await {
        Ok(cart) => {
            info!(
                event_name = "api.carts.product_added",
                cart_id = cart.id.0,
                product_id = %pid,
                "product added to cart"
            );
            let payload = CartResponse { message: "product added to cart".to_string(), cart };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}
