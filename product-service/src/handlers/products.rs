//! `/products` routes.
//!
//! Each handler performs exactly one store call. Not-found is not an error:
//! updating a missing id answers `null`, deleting one still reports success.

use crate::dtos::{MessageResponse, ProductResponse};
use crate::error::ProductApiError;
use crate::middleware::ProductBody;
use crate::models::parse_product_id;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ProductApiError> {
    let products = state.store.list_all().await.map_err(|e| {
        tracing::error!("Failed to list products: {}", e);
        ProductApiError::read(e)
    })?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

pub async fn create_product(
    State(state): State<AppState>,
    ProductBody(fields): ProductBody,
) -> Result<(StatusCode, Json<ProductResponse>), ProductApiError> {
    let product = state.store.insert(fields).await.map_err(|e| {
        tracing::error!("Failed to create product: {}", e);
        ProductApiError::write(e)
    })?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ProductBody(fields): ProductBody,
) -> Result<Json<Option<ProductResponse>>, ProductApiError> {
    let id = parse_product_id(&id).map_err(ProductApiError::write)?;

    let product = state.store.update_by_id(id, fields).await.map_err(|e| {
        tracing::error!(product_id = %id, "Failed to update product: {}", e);
        ProductApiError::write(e)
    })?;

    if product.is_none() {
        tracing::debug!(product_id = %id, "Update matched no product");
    }

    Ok(Json(product.map(ProductResponse::from)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ProductApiError> {
    let id = parse_product_id(&id).map_err(ProductApiError::write)?;

    let deleted = state.store.delete_by_id(id).await.map_err(|e| {
        tracing::error!(product_id = %id, "Failed to delete product: {}", e);
        ProductApiError::write(e)
    })?;

    tracing::info!(product_id = %id, existed = deleted.is_some(), "Product deleted");

    Ok(Json(MessageResponse::new("Product deleted")))
}
