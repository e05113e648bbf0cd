//! Route definitions for the MODARTE dashboard API

use axum::{
    routing::{delete, get},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Product catalog
        .nest("/products", product_routes())
        // Sale registration and history
        .nest("/sales", sale_routes())
        // Dashboard metrics and charts
        .nest("/dashboard", dashboard_routes())
        // Report export
        .nest("/reports", report_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Sale routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::register_sale))
        .route("/:sale_id", delete(handlers::delete_sale))
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(handlers::get_dashboard_metrics))
        .route("/sales-by-product", get(handlers::get_sales_by_product))
}

/// Report export routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/pdf", get(handlers::export_pdf))
        .route("/csv", get(handlers::export_csv))
}
