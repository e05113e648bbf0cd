//! Reporting service for dashboard metrics and report export
//!
//! KPIs are folded from the freshly queried product table on every call;
//! the chart series comes from the sale history joined to products. Export
//! targets are a paginated A4 PDF and a CSV download.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::services::product::{ProductService, ProductWithMetrics};

// A4 layout, mirroring the report this replaces: 2 cm margins, Helvetica,
// 4.5 mm per product line, break when the cursor drops into the margin.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_STEP_MM: f32 = 4.5;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    low_stock_threshold: i64,
}

/// Dashboard KPIs plus the low-stock alert list
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub total_units_sold: i64,
    pub total_stock: i64,
    pub low_stock: Vec<LowStockEntry>,
}

/// Product at or below the configured stock threshold
#[derive(Debug, Clone, Serialize)]
pub struct LowStockEntry {
    pub id: i64,
    pub name: String,
    pub current_stock: i64,
}

/// Per-product chart series entry (units-sold and revenue bars)
#[derive(Debug, Serialize, FromRow)]
pub struct SalesByProduct {
    pub product_id: i64,
    pub product_name: String,
    pub units_sold: i64,
    pub revenue: Decimal,
}

/// CSV row for the product report
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: i64,
    name: &'a str,
    code: &'a str,
    price: Decimal,
    unit_profit: Decimal,
    initial_stock: i64,
    current_stock: i64,
    units_sold: i64,
    revenue: Decimal,
    profit: Decimal,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool, low_stock_threshold: i64) -> Self {
        Self {
            db,
            low_stock_threshold,
        }
    }

    /// Get dashboard metrics, recomputed from a fresh catalog read
    pub async fn dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        let products = ProductService::new(self.db.clone()).list(None).await?;
        Ok(compute_dashboard_metrics(
            &products,
            self.low_stock_threshold,
        ))
    }

    /// Get the per-product chart series from the sale history
    pub async fn sales_by_product(&self) -> AppResult<Vec<SalesByProduct>> {
        let series = sqlx::query_as::<_, SalesByProduct>(
            r#"
            SELECT p.id AS product_id,
                   p.produto AS product_name,
                   CAST(COALESCE(SUM(v.quantidade), 0) AS BIGINT) AS units_sold,
                   COALESCE(SUM(v.quantidade * v.preco_unitario), 0) AS revenue
            FROM produtos p
            LEFT JOIN vendas v ON v.produto_id = p.id
            GROUP BY p.id, p.produto
            ORDER BY units_sold DESC, p.produto
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(series)
    }

    /// Render the paginated PDF report for the given (possibly filtered)
    /// product table
    pub fn render_pdf(
        products: &[ProductWithMetrics],
        generated_at: DateTime<Utc>,
    ) -> AppResult<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Relatorio de Vendas - MODARTE",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "report",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Export(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        layer.use_text(
            "Relatório de Vendas - MODARTE",
            16.0,
            Mm(MARGIN_MM),
            Mm(y),
            &bold,
        );
        y -= 10.0;

        layer.use_text(
            format!("Data: {}", generated_at.format("%d/%m/%Y %H:%M")),
            10.0,
            Mm(MARGIN_MM),
            Mm(y),
            &regular,
        );
        y -= 10.0;

        let (total_revenue, total_profit) = report_totals(products);
        layer.use_text(
            format!("Renda Total: {}", format_currency(total_revenue)),
            11.0,
            Mm(MARGIN_MM),
            Mm(y),
            &bold,
        );
        y -= 6.0;
        layer.use_text(
            format!("Lucro Total: {}", format_currency(total_profit)),
            11.0,
            Mm(MARGIN_MM),
            Mm(y),
            &bold,
        );
        y -= 10.0;

        layer.use_text("Produtos:", 10.0, Mm(MARGIN_MM), Mm(y), &bold);
        y -= 5.0;

        for product in products {
            layer.use_text(product_line(product), 9.0, Mm(MARGIN_MM), Mm(y), &regular);
            y -= LINE_STEP_MM;

            if y < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "report");
                layer = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
        }

        doc.save_to_bytes()
            .map_err(|e| AppError::Export(e.to_string()))
    }

    /// Serialize the (possibly filtered) product table as CSV
    pub fn export_to_csv(products: &[ProductWithMetrics]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for product in products {
            wtr.serialize(ReportRow {
                id: product.product.id,
                name: &product.product.name,
                code: &product.product.code,
                price: product.product.price,
                unit_profit: product.product.unit_profit,
                initial_stock: product.product.initial_stock,
                current_stock: product.product.current_stock,
                units_sold: product.units_sold,
                revenue: product.revenue,
                profit: product.profit,
            })
            .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

/// Fold dashboard KPIs from a product table with computed metrics
pub fn compute_dashboard_metrics(
    products: &[ProductWithMetrics],
    low_stock_threshold: i64,
) -> DashboardMetrics {
    let (total_revenue, total_profit) = report_totals(products);
    let total_units_sold = products.iter().map(|p| p.units_sold).sum();
    let total_stock = products.iter().map(|p| p.product.current_stock).sum();

    let low_stock = products
        .iter()
        .filter(|p| p.product.current_stock <= low_stock_threshold)
        .map(|p| LowStockEntry {
            id: p.product.id,
            name: p.product.name.clone(),
            current_stock: p.product.current_stock,
        })
        .collect();

    DashboardMetrics {
        total_revenue,
        total_profit,
        total_units_sold,
        total_stock,
        low_stock,
    }
}

/// Aggregate revenue and profit for the report KPI block
pub fn report_totals(products: &[ProductWithMetrics]) -> (Decimal, Decimal) {
    products.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(revenue, profit), product| (revenue + product.revenue, profit + product.profit),
    )
}

/// One report line per product
pub fn product_line(product: &ProductWithMetrics) -> String {
    format!(
        "{} | Vendidos: {} | Renda: {}",
        product.product.name,
        product.units_sold,
        format_currency(product.revenue)
    )
}

/// Currency display used by the report and KPI blocks
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {:.2}", value)
}
