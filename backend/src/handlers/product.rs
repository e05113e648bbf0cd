//! HTTP handlers for product catalog endpoints
//!
//! Write handlers return the freshly re-read row, so the dashboard always
//! renders current data after a confirmed write.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::product::{ProductInput, ProductService, ProductWithMetrics};
use crate::AppState;

/// Optional exact-name filter, mirroring the dashboard filter widget
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
}

/// List all products with freshly computed derived metrics
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<ProductWithMetrics>>> {
    let service = ProductService::new(state.db);
    let products = service.list(filter.name.as_deref()).await?;
    Ok(Json(products))
}

/// Get one product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<ProductWithMetrics>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Insert a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<ProductWithMetrics>> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok(Json(product))
}

/// Update a product's mutable fields by id
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<ProductWithMetrics>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product by id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(Json(()))
}
