use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tienda_core::config::{AppConfig, ConfigError, LoadOptions};
use tienda_store::{CartStore, ProductStore};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub products: Arc<ProductStore>,
    pub carts: Arc<CartStore>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not create data directory `{path}`: {source}")]
    DataDir { path: PathBuf, source: std::io::Error },
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    // The stores swallow write failures per request; making sure the data
    // directory exists up front is the one place a missing destination is
    // allowed to fail loudly.
    for path in [&config.data.products_path, &config.data.carts_path] {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                BootstrapError::DataDir { path: parent.to_path_buf(), source }
            })?;
        }
    }

    let products = Arc::new(ProductStore::new(config.data.products_path.clone()));
    let carts = Arc::new(CartStore::new(config.data.carts_path.clone()));

    info!(
        event_name = "system.bootstrap.stores_ready",
        products_document = %config.data.products_path.display(),
        carts_document = %config.data.carts_path.display(),
        "collection stores initialized"
    );

    Ok(Application { config, products, carts })
}

impl Application {
    pub fn router(&self) -> Router {
        Router::new()
            .nest("/api/products", crate::products::router(self.products.clone()))
            .nest("/api/carts", crate::carts::router(self.carts.clone()))
            .merge(crate::health::router(self.config.data.clone()))
            .layer(TraceLayer::new_for_http())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tienda_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use tower::ServiceExt;

    use crate::bootstrap::{bootstrap, bootstrap_with_config};

    fn test_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.products_path = dir.path().join("data").join("products.json");
        config.data.carts_path = dir.path().join("data").join("carts.json");
        config
    }

    fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    fn bare_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn product_payload(title: &str) -> Value {
        json!({
            "title": title,
            "description": "a product",
            "code": format!("SKU-{title}"),
            "price": 10,
            "stock": 5,
            "category": "general"
        })
    }

    #[tokio::test]
    async fn bootstrap_applies_overrides_and_creates_the_data_directory() {
        let dir = TempDir::new().expect("tempdir");

        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                products_path: Some(dir.path().join("data").join("products.json")),
                carts_path: Some(dir.path().join("data").join("carts.json")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed");

        assert!(dir.path().join("data").is_dir());
        assert_eq!(app.config.data.products_path, dir.path().join("data").join("products.json"));
    }

    #[tokio::test]
    async fn product_routes_cover_the_full_crud_flow() {
        let dir = TempDir::new().expect("tempdir");
        let app =
            bootstrap_with_config(test_config(&dir)).await.expect("bootstrap should succeed");
        let router = app.router();

        // Create two products; ids are assigned by the store.
        let created = router
            .clone()
            .oneshot(json_request("POST", "/api/products", &product_payload("A")))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["message"], "product added successfully");
        assert_eq!(created["product"]["id"], 1);
        assert_eq!(created["product"]["status"], true);
        assert_eq!(created["product"]["thumbnails"], json!([]));

        let second = router
            .clone()
            .oneshot(json_request("POST", "/api/products", &product_payload("B")))
            .await
            .expect("response");
        assert_eq!(body_json(second).await["product"]["id"], 2);

        // Listing honors the limit cap and document order.
        let limited = router
            .clone()
            .oneshot(bare_request("GET", "/api/products?limit=1"))
            .await
            .expect("response");
        assert_eq!(limited.status(), StatusCode::OK);
        let limited = body_json(limited).await;
        assert_eq!(limited.as_array().map(Vec::len), Some(1));
        assert_eq!(limited[0]["title"], "A");

        // Update pins the id and merges shallowly.
        let updated = router
            .clone()
            .oneshot(json_request("PUT", "/api/products/2", &json!({"id": 888, "price": 99.5})))
            .await
            .expect("response");
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = body_json(updated).await;
        assert_eq!(updated["product"]["id"], 2);
        assert_eq!(updated["product"]["price"], 99.5);
        assert_eq!(updated["product"]["title"], "B");

        // Delete the first product; a later create must not reuse its id.
        let deleted = router
            .clone()
            .oneshot(bare_request("DELETE", "/api/products/1"))
            .await
            .expect("response");
        assert_eq!(deleted.status(), StatusCode::OK);

        let third = router
            .clone()
            .oneshot(json_request("POST", "/api/products", &product_payload("C")))
            .await
            .expect("response");
        assert_eq!(body_json(third).await["product"]["id"], 3);

        // The deleted id is gone.
        let missing = router
            .clone()
            .oneshot(bare_request("GET", "/api/products/1"))
            .await
            .expect("response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await["error"], "product not found");

        // Caller errors map to 400.
        let invalid_limit = router
            .clone()
            .oneshot(bare_request("GET", "/api/products?limit=abc"))
            .await
            .expect("response");
        assert_eq!(invalid_limit.status(), StatusCode::BAD_REQUEST);

        let incomplete = router
            .oneshot(json_request("POST", "/api/products", &json!({"title": "only"})))
            .await
            .expect("response");
        assert_eq!(incomplete.status(), StatusCode::BAD_REQUEST);
        let incomplete = body_json(incomplete).await;
        assert_eq!(incomplete["error"], "all fields are required except thumbnails");
    }

    #[tokio::test]
    async fn cart_routes_create_fetch_and_append() {
        let dir = TempDir::new().expect("tempdir");
        let app =
            bootstrap_with_config(test_config(&dir)).await.expect("bootstrap should succeed");
        let router = app.router();

        let created = router
            .clone()
            .oneshot(bare_request("POST", "/api/carts"))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["cart"]["id"], 1);
        assert_eq!(created["cart"]["products"], json!([]));

        // Appending the same product twice yields two separate line items.
        for _ in 0..2 {
            let appended = router
                .clone()
                .oneshot(bare_request("POST", "/api/carts/1/product/15"))
                .await
                .expect("response");
            assert_eq!(appended.status(), StatusCode::OK);
        }

        let fetched = router
            .clone()
            .oneshot(bare_request("GET", "/api/carts/1"))
            .await
            .expect("response");
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched = body_json(fetched).await;
        assert_eq!(
            fetched["products"],
            json!([
                {"product": "15", "quantity": 1},
                {"product": "15", "quantity": 1}
            ])
        );

        let missing = router
            .oneshot(bare_request("POST", "/api/carts/9/product/1"))
            .await
            .expect("response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await["error"], "cart not found");
    }

    #[tokio::test]
    async fn health_reports_document_state() {
        let dir = TempDir::new().expect("tempdir");
        let app =
            bootstrap_with_config(test_config(&dir)).await.expect("bootstrap should succeed");
        let router = app.router();

        let healthy = router
            .clone()
            .oneshot(bare_request("GET", "/health"))
            .await
            .expect("response");
        assert_eq!(healthy.status(), StatusCode::OK);

        std::fs::write(dir.path().join("data").join("products.json"), "{ broken")
            .expect("corrupt the document");

        let degraded = router.oneshot(bare_request("GET", "/health")).await.expect("response");
        assert_eq!(degraded.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(degraded).await["status"], "degraded");
    }
}
