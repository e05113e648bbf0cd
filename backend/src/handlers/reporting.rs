//! HTTP handlers for dashboard metrics and report export

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use chrono::Utc;

use crate::error::AppResult;
use crate::handlers::product::ProductFilter;
use crate::services::product::ProductService;
use crate::services::reporting::{DashboardMetrics, ReportingService, SalesByProduct};
use crate::AppState;

/// Get dashboard KPIs and the low-stock alert list
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.db, state.config.dashboard.low_stock_threshold);
    let metrics = service.dashboard_metrics().await?;
    Ok(Json(metrics))
}

/// Get the per-product chart series (units sold and revenue)
pub async fn get_sales_by_product(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SalesByProduct>>> {
    let service = ReportingService::new(state.db, state.config.dashboard.low_stock_threshold);
    let series = service.sales_by_product().await?;
    Ok(Json(series))
}

/// Export the (possibly filtered) product table as a downloadable PDF
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let products = ProductService::new(state.db)
        .list(filter.name.as_deref())
        .await?;
    let bytes = ReportingService::render_pdf(&products, Utc::now())?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"relatorio_modarte.pdf\""),
    );
    Ok((headers, bytes))
}

/// Export the (possibly filtered) product table as CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<(HeaderMap, String)> {
    let products = ProductService::new(state.db)
        .list(filter.name.as_deref())
        .await?;
    let csv_data = ReportingService::export_to_csv(&products)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"relatorio_modarte.csv\""),
    );
    Ok((headers, csv_data))
}
