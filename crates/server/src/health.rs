use std::io::ErrorKind;
use std::path::Path;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tienda_core::config::DataConfig;

#[derive(Clone)]
pub struct HealthState {
    data: DataConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: HealthCheck,
    pub carts: HealthCheck,
}

pub fn router(data: DataConfig) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { data })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let products = document_check(&state.data.products_path).await;
    let carts = document_check(&state.data.carts_path).await;
    let ready = products.status == "ready" && carts.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        products,
        carts,
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

/// An absent document is healthy (reads treat it as an empty collection); a
/// present document that is not a JSON array means stored data is being
/// masked, which is worth surfacing before a write clobbers it.
async fn document_check(path: &Path) -> HealthCheck {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return HealthCheck {
                status: "ready",
                detail: "document absent, treated as empty".to_string(),
            };
        }
        Err(error) => {
            return HealthCheck {
                status: "degraded",
                detail: format!("document read failed: {error}"),
            };
        }
    };

    match serde_json::from_slice::<Vec<serde_json::Value>>(&raw) {
        Ok(entities) => HealthCheck {
            status: "ready",
            detail: format!("document holds {} entities", entities.len()),
        },
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!("document is not a JSON array: {error}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, Json};
    use tempfile::TempDir;
    use tienda_core::config::DataConfig;

    use crate::health::{health, HealthState};

    fn data_config(dir: &TempDir) -> DataConfig {
        DataConfig {
            products_path: dir.path().join("products.json"),
            carts_path: dir.path().join("carts.json"),
        }
    }

    #[tokio::test]
    async fn health_is_ready_when_documents_are_absent() {
        let dir = TempDir::new().expect("tempdir");

        let (status, Json(payload)) =
            health(State(HealthState { data: data_config(&dir) })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.products.status, "ready");
        assert_eq!(payload.carts.status, "ready");
    }

    #[tokio::test]
    async fn health_is_ready_when_documents_hold_arrays() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("products.json"), "[]").expect("write products");
        std::fs::write(dir.path().join("carts.json"), "[{\"id\":1,\"products\":[]}]")
            .expect("write carts");

        let (status, Json(payload)) =
            health(State(HealthState { data: data_config(&dir) })).await;

        assert_eq!(status, StatusCode::OK);
        assert!(payload.carts.detail.contains("1 entities"));
    }

    #[tokio::test]
    async fn health_degrades_when_a_document_is_corrupt() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("products.json"), "{ broken").expect("write products");

        let (status, Json(payload)) =
            health(State(HealthState { data: data_config(&dir) })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.products.status, "degraded");
        assert_eq!(payload.carts.status, "ready");
    }
}
