use super::error::ApiError;
use super::upload::{UploadedFile, CSV_TYPES, IMAGE_TYPES};
use super::AppState;
use crate::api::ProductForm;
use crate::import::ImportSummary;
use crate::model::{Category, Product, ProductId};
use crate::store::DataStore;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Multipart field carrying a product image.
const IMAGE_FIELD: &str = "imagename";
/// Multipart field carrying an import file.
const CSV_FIELD: &str = "csvfile";

/// GET /
pub async fn root_handler() -> &'static str {
    "Inventory API"
}

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// GET /product/{id}
///
/// Responds with `null` when no product has that id, including ids that are not numbers.
pub async fn get_product_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Product>>, ApiError> {
    let Ok(id) = id.trim().parse::<ProductId>() else {
        return Ok(Json(None));
    };
    let api = state.api.lock().await;
    let result = api.get_product(id)?;
    Ok(Json(result.listed_products.into_iter().next()))
}

/// GET /products
pub async fn list_products_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let api = state.api.lock().await;
    let result = api.list_products(Default::default())?;
    Ok(Json(result.listed_products))
}

/// POST /product
///
/// Multipart form with the product fields and an optional `imagename` file.
pub async fn save_product_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    let mut form = ProductForm::default();
    let mut image: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == IMAGE_FIELD && field.file_name().is_some() {
            image = Some(read_file(field).await?);
        } else {
            form.set(&name, field.text().await?);
        }
    }

    let stored = match &image {
        Some(file) if !file.bytes.is_empty() => {
            file.validate(IMAGE_TYPES, state.max_upload_bytes)?;
            Some(file.store(&state.uploads).await?)
        }
        _ => None,
    };

    let saved = state.api.lock().await.save_product(&form, stored.as_deref());
    if let Err(e) = saved {
        if let Some(name) = &stored {
            if let Err(io) = tokio::fs::remove_file(state.uploads.join(name)).await {
                warn!(file = %name, error = %io, "could not discard image of rejected save");
            }
        }
        return Err(e.into());
    }
    Ok(StatusCode::OK)
}

/// POST /products/csv
///
/// Imports the uploaded `csvfile` and answers with the per-batch counts.
pub async fn import_csv_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, ApiError> {
    let mut upload: Option<UploadedFile> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(CSV_FIELD) {
            upload = Some(read_file(field).await?);
        }
    }

    let file = upload.ok_or_else(|| ApiError::BadRequest("CSV file is required.".to_string()))?;
    file.validate(CSV_TYPES, state.max_upload_bytes)?;
    let stored = file.store(&state.uploads).await?;
    let text = file.text()?;

    let mut api = state.api.lock().await;
    let result = api.import_csv(&text)?;
    let summary = result.summary.unwrap_or_default();
    info!(file = %stored, inserted = summary.inserted, updated = summary.updated, "csv import request done");
    Ok(Json(summary))
}

/// DELETE /product/{id}
pub async fn delete_product_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Ok(id) = id.trim().parse::<ProductId>() else {
        return Ok(StatusCode::OK);
    };
    let mut api = state.api.lock().await;
    api.delete_product(id)?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuRequest {
    #[serde(default)]
    pub sku_code: String,
}

/// POST /product/sku
pub async fn find_by_sku_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<SkuRequest>,
) -> Result<Json<Option<Product>>, ApiError> {
    let api = state.api.lock().await;
    let result = api.find_by_sku(&request.sku_code)?;
    Ok(Json(result.listed_products.into_iter().next()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRequest {
    #[serde(default)]
    pub product_name: String,
}

/// POST /product/name
pub async fn search_by_name_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<NameRequest>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let api = state.api.lock().await;
    let result = api.search_by_name(&request.product_name)?;
    Ok(Json(result.listed_products))
}

/// GET /categories
pub async fn list_categories_handler<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let api = state.api.lock().await;
    let result = api.list_categories()?;
    Ok(Json(result.categories))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<UploadedFile, ApiError> {
    let original_name = field.file_name().unwrap_or("").to_string();
    let content_type = field.content_type().unwrap_or("").to_string();
    let bytes = field.bytes().await?;
    Ok(UploadedFile {
        original_name,
        content_type,
        bytes,
    })
}
