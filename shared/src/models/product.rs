//! Product domain types and derived sales metrics

use rust_decimal::Decimal;
use serde::Serialize;

/// Product fields under validation, borrowed from whichever store supplies
/// them (hosted database or spreadsheet file)
#[derive(Debug, Clone, Copy)]
pub struct ProductDraft<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub photo: &'a str,
    pub price: Decimal,
    pub unit_profit: Decimal,
    pub initial_stock: i64,
    pub current_stock: i64,
}

/// Derived columns recomputed from the stock delta on every read.
///
/// These are never persisted on their own; the stored `renda_atual` and
/// `lucro_atual` columns exist for migration fidelity only and are not
/// trusted as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductMetrics {
    pub units_sold: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

impl ProductMetrics {
    /// Compute units sold, revenue, and profit from the stock delta.
    ///
    /// Units sold clamp at zero: a current stock above the initial one is
    /// reachable through direct data edits and must not produce negative
    /// sales figures.
    pub fn compute(
        initial_stock: i64,
        current_stock: i64,
        price: Decimal,
        unit_profit: Decimal,
    ) -> Self {
        let units_sold = (initial_stock - current_stock).max(0);
        let units = Decimal::from(units_sold);
        Self {
            units_sold,
            revenue: units * price,
            profit: units * unit_profit,
        }
    }
}
