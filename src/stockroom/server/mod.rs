//! # HTTP Server
//!
//! Another thin client of [`InventoryApi`]: the same operations the CLI exposes,
//! served over HTTP with axum.
//!
//! Routes:
//! - `GET /` - Banner
//! - `GET /health` - Health check
//! - `GET /product/{id}` - One product, or `null`
//! - `GET /products` - All products
//! - `POST /product` - Save one product (multipart, optional `imagename` file)
//! - `POST /products/csv` - Bulk import (multipart, `csvfile`)
//! - `DELETE /product/{id}` - Delete a product
//! - `POST /product/sku` - Product by barcode (`{"skuCode": ...}`)
//! - `POST /product/name` - Products by name (`{"productName": ...}`)
//! - `GET /categories` - All categories
//!
//! ## Concurrency
//!
//! The catalog sits behind one async mutex. Each request takes it only after its
//! upload (if any) has been read and stored, and releases it when the catalog work
//! is done, so imports and saves are serialized against each other.

use crate::api::InventoryApi;
use crate::error::Result;
use crate::store::DataStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod upload;

use handlers::*;

/// Room for multipart framing and text fields on top of the file limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across handlers.
pub struct AppState<S: DataStore> {
    pub api: Mutex<InventoryApi<S>>,
    pub uploads: PathBuf,
    pub max_upload_bytes: usize,
}

impl<S: DataStore> AppState<S> {
    pub fn new(api: InventoryApi<S>, max_upload_bytes: usize) -> Self {
        let uploads = api.paths().uploads_dir();
        Self {
            api: Mutex::new(api),
            uploads,
            max_upload_bytes,
        }
    }
}

/// Create the API router.
pub fn create_router<S: DataStore + Send + 'static>(state: AppState<S>) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/product/{id}",
            get(get_product_handler::<S>).delete(delete_product_handler::<S>),
        )
        .route("/products", get(list_products_handler::<S>))
        .route("/product", post(save_product_handler::<S>))
        .route("/products/csv", post(import_csv_handler::<S>))
        .route("/product/sku", post(find_by_sku_handler::<S>))
        .route("/product/name", post(search_by_name_handler::<S>))
        .route("/categories", get(list_categories_handler::<S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve<S: DataStore + Send + 'static>(state: AppState<S>, addr: &str) -> Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Inventory API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Inventory API stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}
