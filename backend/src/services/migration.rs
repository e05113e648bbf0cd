//! One-shot migration from the embedded SQLite store to hosted Postgres
//!
//! Copies all rows of `produtos` and `vendas`, skipping ids already present
//! in the destination (insert-if-absent, never overwrite). One commit per
//! table; any database error aborts the whole run. Re-running is a no-op for
//! rows that already made it across.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, SqlitePool};

use crate::error::AppResult;

/// Migration service holding the source and destination pools
pub struct MigrationService {
    source: SqlitePool,
    dest: PgPool,
}

/// Row counts for one migrated table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    pub read: u64,
    pub inserted: u64,
}

/// `produtos` row as stored in the embedded source
#[derive(Debug, FromRow)]
struct SourceProduct {
    id: i64,
    produto: String,
    codigo: String,
    preco: f64,
    lucro: f64,
    estoque_inicial: i64,
    estoque_atual: i64,
    foto: String,
    renda_atual: f64,
    lucro_atual: f64,
}

/// `vendas` row as stored in the embedded source (no profit column there)
#[derive(Debug, FromRow)]
struct SourceSale {
    id: i64,
    produto_id: i64,
    quantidade: i64,
    preco_unitario: f64,
    data_venda: NaiveDate,
}

/// Embedded REAL columns can hold garbage; coerce to zero instead of
/// aborting, matching the import behaviour this replaces.
fn decimal_or_zero(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

impl MigrationService {
    /// Create a new MigrationService instance
    pub fn new(source: SqlitePool, dest: PgPool) -> Self {
        Self { source, dest }
    }

    /// Migrate both tables, products first so the sale foreign keys resolve
    pub async fn run(&self) -> AppResult<(TableReport, TableReport)> {
        let products = self.migrate_products().await?;
        let sales = self.migrate_sales().await?;
        Ok((products, sales))
    }

    /// Copy all `produtos` rows, skipping ids already present
    pub async fn migrate_products(&self) -> AppResult<TableReport> {
        let rows = sqlx::query_as::<_, SourceProduct>(
            "SELECT id, produto, codigo, preco, lucro, estoque_inicial, estoque_atual, \
                    foto, renda_atual, lucro_atual \
             FROM produtos",
        )
        .fetch_all(&self.source)
        .await?;

        let mut tx = self.dest.begin().await?;
        let mut inserted = 0u64;
        for row in &rows {
            let result = sqlx::query(
                r#"
                INSERT INTO produtos (
                    id, produto, codigo, preco, lucro,
                    estoque_inicial, estoque_atual,
                    foto, renda_atual, lucro_atual
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(&row.produto)
            .bind(&row.codigo)
            .bind(decimal_or_zero(row.preco))
            .bind(decimal_or_zero(row.lucro))
            .bind(row.estoque_inicial)
            .bind(row.estoque_atual)
            .bind(&row.foto)
            .bind(decimal_or_zero(row.renda_atual))
            .bind(decimal_or_zero(row.lucro_atual))
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        // Copied rows carry explicit ids; keep the sequence ahead of them so
        // later dashboard inserts don't collide.
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('produtos', 'id'), \
                    COALESCE(MAX(id), 0) + 1, false) \
             FROM produtos",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let report = TableReport {
            read: rows.len() as u64,
            inserted,
        };
        tracing::info!(
            read = report.read,
            inserted = report.inserted,
            "produtos table migrated"
        );
        Ok(report)
    }

    /// Copy all `vendas` rows, skipping ids already present. The destination
    /// profit column keeps its default; the source never stored one.
    pub async fn migrate_sales(&self) -> AppResult<TableReport> {
        let rows = sqlx::query_as::<_, SourceSale>(
            "SELECT id, produto_id, quantidade, preco_unitario, data_venda FROM vendas",
        )
        .fetch_all(&self.source)
        .await?;

        let mut tx = self.dest.begin().await?;
        let mut inserted = 0u64;
        for row in &rows {
            let result = sqlx::query(
                r#"
                INSERT INTO vendas (
                    id, produto_id, quantidade,
                    preco_unitario, data_venda
                ) VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(row.produto_id)
            .bind(row.quantidade)
            .bind(decimal_or_zero(row.preco_unitario))
            .bind(row.data_venda)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('vendas', 'id'), \
                    COALESCE(MAX(id), 0) + 1, false) \
             FROM vendas",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let report = TableReport {
            read: rows.len() as u64,
            inserted,
        };
        tracing::info!(
            read = report.read,
            inserted = report.inserted,
            "vendas table migrated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_coercion() {
        assert_eq!(decimal_or_zero(49.5), Decimal::new(495, 1));
        assert_eq!(decimal_or_zero(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_or_zero(f64::INFINITY), Decimal::ZERO);
    }
}
