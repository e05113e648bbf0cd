//! Product catalog service backed by the hosted database
//!
//! Every read is a full table scan with the derived columns recomputed on
//! the spot; nothing is memoized between interactions. Deletes address rows
//! by primary key only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::models::{ProductDraft, ProductMetrics};
use shared::validation::validate_product;

use crate::error::{AppError, AppResult};

/// Product service for catalog reads and writes
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// A product row from the `produtos` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub price: Decimal,
    pub unit_profit: Decimal,
    pub initial_stock: i64,
    pub current_stock: i64,
    pub photo: String,
}

/// Product enriched with the derived sales metrics
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithMetrics {
    #[serde(flatten)]
    pub product: Product,
    pub units_sold: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

/// Input for creating or updating a product
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub code: String,
    pub price: Decimal,
    pub unit_profit: Decimal,
    pub initial_stock: i64,
    pub current_stock: i64,
    pub photo: String,
}

impl ProductInput {
    /// Borrowed view handed to the shared validation rules
    pub fn draft(&self) -> ProductDraft<'_> {
        ProductDraft {
            name: &self.name,
            code: &self.code,
            photo: &self.photo,
            price: self.price,
            unit_profit: self.unit_profit,
            initial_stock: self.initial_stock,
            current_stock: self.current_stock,
        }
    }
}

/// Attach freshly computed derived columns to a product row
pub fn with_metrics(product: Product) -> ProductWithMetrics {
    let metrics = ProductMetrics::compute(
        product.initial_stock,
        product.current_stock,
        product.price,
        product.unit_profit,
    );
    ProductWithMetrics {
        product,
        units_sold: metrics.units_sold,
        revenue: metrics.revenue,
        profit: metrics.profit,
    }
}

// The stored schema keeps the embedded source's Portuguese column names;
// aliases map them onto the model.
const PRODUCT_COLUMNS: &str = "id, produto AS name, codigo AS code, preco AS price, \
     lucro AS unit_profit, estoque_inicial AS initial_stock, \
     estoque_atual AS current_stock, foto AS photo";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the catalog with derived metrics, optionally filtered to one
    /// product name (the dashboard filter widget matches exactly)
    pub async fn list(&self, name_filter: Option<&str>) -> AppResult<Vec<ProductWithMetrics>> {
        let products = match name_filter {
            Some(name) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE produto = $1 ORDER BY produto, id"
                ))
                .bind(name)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM produtos ORDER BY produto, id"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(products.into_iter().map(with_metrics).collect())
    }

    /// Get one product by id
    pub async fn get(&self, id: i64) -> AppResult<ProductWithMetrics> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(with_metrics(product))
    }

    /// Insert a new product after validation
    pub async fn create(&self, input: ProductInput) -> AppResult<ProductWithMetrics> {
        validate_product(&input.draft())?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO produtos (produto, codigo, preco, lucro, estoque_inicial, estoque_atual, foto) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.code)
        .bind(input.price)
        .bind(input.unit_profit)
        .bind(input.initial_stock)
        .bind(input.current_stock)
        .bind(&input.photo)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(product_id = product.id, name = %product.name, "product created");
        Ok(with_metrics(product))
    }

    /// Update a product's mutable fields by id, after validation
    pub async fn update(&self, id: i64, input: ProductInput) -> AppResult<ProductWithMetrics> {
        validate_product(&input.draft())?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE produtos \
             SET produto = $1, codigo = $2, preco = $3, lucro = $4, \
                 estoque_inicial = $5, estoque_atual = $6, foto = $7 \
             WHERE id = $8 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.code)
        .bind(input.price)
        .bind(input.unit_profit)
        .bind(input.initial_stock)
        .bind(input.current_stock)
        .bind(&input.photo)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        tracing::info!(product_id = id, "product updated");
        Ok(with_metrics(product))
    }

    /// Delete a product by id. Irreversible; the sale history cascades away
    /// with the row.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }
}
