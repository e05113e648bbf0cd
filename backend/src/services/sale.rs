//! Sale registration and deletion with stock adjustments
//!
//! Registering a sale and decrementing the product's stock is one
//! transaction; so is the reverse on deletion. The product row is locked for
//! the duration, so concurrent registrations serialize instead of racing on
//! `estoque_atual`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::validation::validate_sale_quantity;

use crate::error::{AppError, AppResult};

/// Sale service for registering and deleting sales
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// A sale row from the `vendas` table.
///
/// Unit price and profit are snapshots taken at registration time; later
/// catalog edits never rewrite sale history.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub unit_profit: Decimal,
    pub sale_date: NaiveDate,
}

/// Sale joined with its product name, for listings and historical charts
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleWithProduct {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub unit_profit: Decimal,
    pub sale_date: NaiveDate,
}

/// Input for registering a sale
#[derive(Debug, Deserialize)]
pub struct RegisterSaleInput {
    pub product_id: i64,
    pub quantity: i64,
    /// Defaults to today when omitted
    pub sale_date: Option<NaiveDate>,
}

const SALE_COLUMNS: &str = "id, produto_id AS product_id, quantidade AS quantity, \
     preco_unitario AS unit_price, lucro_unitario AS unit_profit, \
     data_venda AS sale_date";

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all sales joined to product names, newest first
    pub async fn list(&self) -> AppResult<Vec<SaleWithProduct>> {
        let sales = sqlx::query_as::<_, SaleWithProduct>(
            r#"
            SELECT v.id, v.produto_id AS product_id, p.produto AS product_name,
                   v.quantidade AS quantity, v.preco_unitario AS unit_price,
                   v.lucro_unitario AS unit_profit, v.data_venda AS sale_date
            FROM vendas v
            JOIN produtos p ON p.id = v.produto_id
            ORDER BY v.data_venda DESC, v.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Register a sale: snapshot the product's price and profit, insert the
    /// sale row, and decrement the stock — all or nothing.
    pub async fn register(&self, input: RegisterSaleInput) -> AppResult<Sale> {
        validate_sale_quantity(input.quantity)?;

        let mut tx = self.db.begin().await?;

        let product: Option<(i64, Decimal, Decimal)> = sqlx::query_as(
            "SELECT estoque_atual, preco, lucro FROM produtos WHERE id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (current_stock, price, unit_profit) =
            product.ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if input.quantity > current_stock {
            return Err(AppError::InsufficientStock {
                requested: input.quantity,
                available: current_stock,
            });
        }

        let sale_date = input.sale_date.unwrap_or_else(|| Utc::now().date_naive());

        let sale = sqlx::query_as::<_, Sale>(&format!(
            "INSERT INTO vendas (produto_id, quantidade, preco_unitario, lucro_unitario, data_venda) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SALE_COLUMNS}"
        ))
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(price)
        .bind(unit_profit)
        .bind(sale_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE produtos SET estoque_atual = estoque_atual - $1 WHERE id = $2")
            .bind(input.quantity)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = sale.id,
            product_id = sale.product_id,
            quantity = sale.quantity,
            "sale registered"
        );
        Ok(sale)
    }

    /// Delete a sale and restore the product's stock by its quantity, in one
    /// transaction
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let sale: Option<(i64, i64)> =
            sqlx::query_as("SELECT produto_id, quantidade FROM vendas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let (product_id, quantity) = sale.ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        sqlx::query("UPDATE produtos SET estoque_atual = estoque_atual + $1 WHERE id = $2")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM vendas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(sale_id = id, product_id, "sale deleted, stock restored");
        Ok(())
    }
}
