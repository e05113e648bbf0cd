//! HTTP handlers for sale endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::sale::{RegisterSaleInput, Sale, SaleService, SaleWithProduct};
use crate::AppState;

/// List all sales joined with product names
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<Vec<SaleWithProduct>>> {
    let service = SaleService::new(state.db);
    let sales = service.list().await?;
    Ok(Json(sales))
}

/// Register a sale, decrementing the product's stock in the same transaction
pub async fn register_sale(
    State(state): State<AppState>,
    Json(input): Json<RegisterSaleInput>,
) -> AppResult<Json<Sale>> {
    let service = SaleService::new(state.db);
    let sale = service.register(input).await?;
    Ok(Json(sale))
}

/// Delete a sale, restoring the product's stock in the same transaction
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = SaleService::new(state.db);
    service.delete(sale_id).await?;
    Ok(Json(()))
}
