//! Sale registration and deletion tests
//!
//! The transactional sequence (snapshot price, insert sale, adjust stock;
//! restore stock, delete sale) is exercised through a pure simulation of the
//! two-table store, the same way the stock ledger properties are tested
//! without a live database.

use proptest::prelude::*;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// ============================================================================
// Simulation of the two-table store
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct ProductState {
    id: i64,
    current_stock: i64,
    price: Decimal,
    unit_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
struct SaleRow {
    id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: Decimal,
    unit_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
struct Store {
    products: Vec<ProductState>,
    sales: Vec<SaleRow>,
    next_sale_id: i64,
}

impl Store {
    fn new(products: Vec<ProductState>) -> Self {
        Self {
            products,
            sales: Vec::new(),
            next_sale_id: 1,
        }
    }

    /// Register a sale: snapshot price/profit, insert the row, decrement
    /// stock. All-or-nothing: a failed guard leaves the store untouched.
    fn register_sale(&mut self, product_id: i64, quantity: i64) -> Result<i64, &'static str> {
        if quantity < 1 {
            return Err("quantity must be at least 1");
        }
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or("product not found")?;
        if quantity > product.current_stock {
            return Err("insufficient stock");
        }

        let sale = SaleRow {
            id: self.next_sale_id,
            product_id,
            quantity,
            unit_price: product.price,
            unit_profit: product.unit_profit,
        };
        product.current_stock -= quantity;
        self.next_sale_id += 1;
        let id = sale.id;
        self.sales.push(sale);
        Ok(id)
    }

    /// Delete a sale: restore the product's stock, remove the row
    fn delete_sale(&mut self, sale_id: i64) -> Result<(), &'static str> {
        let position = self
            .sales
            .iter()
            .position(|s| s.id == sale_id)
            .ok_or("sale not found")?;
        let sale = self.sales.remove(position);
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == sale.product_id)
            .ok_or("product not found")?;
        product.current_stock += sale.quantity;
        Ok(())
    }

    fn stock_of(&self, product_id: i64) -> i64 {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.current_stock)
            .unwrap_or(0)
    }
}

fn two_product_store() -> Store {
    Store::new(vec![
        ProductState {
            id: 1,
            current_stock: 10,
            price: dec("50.00"),
            unit_profit: dec("20.00"),
        },
        ProductState {
            id: 2,
            current_stock: 8,
            price: dec("120.00"),
            unit_profit: dec("45.00"),
        },
    ])
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Registering quantity 3 against stock 10 leaves stock 7 and exactly
    /// one sale row of quantity 3
    #[test]
    fn test_register_decrements_stock() {
        let mut store = two_product_store();
        store.register_sale(1, 3).unwrap();

        assert_eq!(store.stock_of(1), 7);
        assert_eq!(store.sales.len(), 1);
        assert_eq!(store.sales[0].product_id, 1);
        assert_eq!(store.sales[0].quantity, 3);
    }

    /// Deleting that sale restores stock 10 and removes the row; the other
    /// product's stock never changes
    #[test]
    fn test_delete_restores_stock() {
        let mut store = two_product_store();
        let sale_id = store.register_sale(1, 3).unwrap();
        assert_eq!(store.stock_of(2), 8);

        store.delete_sale(sale_id).unwrap();
        assert_eq!(store.stock_of(1), 10);
        assert_eq!(store.stock_of(2), 8);
        assert!(store.sales.is_empty());
    }

    #[test]
    fn test_register_rejects_zero_quantity() {
        let mut store = two_product_store();
        assert!(store.register_sale(1, 0).is_err());
        assert_eq!(store.stock_of(1), 10);
        assert!(store.sales.is_empty());
    }

    #[test]
    fn test_register_rejects_insufficient_stock() {
        let mut store = two_product_store();
        assert_eq!(store.register_sale(1, 11), Err("insufficient stock"));
        assert_eq!(store.stock_of(1), 10);
    }

    #[test]
    fn test_register_rejects_unknown_product() {
        let mut store = two_product_store();
        assert_eq!(store.register_sale(99, 1), Err("product not found"));
    }

    #[test]
    fn test_delete_rejects_unknown_sale() {
        let mut store = two_product_store();
        assert_eq!(store.delete_sale(42), Err("sale not found"));
    }

    /// Later price edits never rewrite sale history: the row keeps the
    /// snapshot taken at registration time
    #[test]
    fn test_sale_snapshots_price_and_profit() {
        let mut store = two_product_store();
        store.register_sale(1, 2).unwrap();

        store.products[0].price = dec("75.00");
        store.products[0].unit_profit = dec("30.00");

        assert_eq!(store.sales[0].unit_price, dec("50.00"));
        assert_eq!(store.sales[0].unit_profit, dec("20.00"));
    }

    /// Selling down to zero is allowed; one more unit is not
    #[test]
    fn test_register_allows_exact_stock() {
        let mut store = two_product_store();
        store.register_sale(2, 8).unwrap();
        assert_eq!(store.stock_of(2), 0);
        assert_eq!(store.register_sale(2, 1), Err("insufficient stock"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Register followed by delete returns the store to its exact
        /// starting state
        #[test]
        fn prop_register_delete_roundtrip(stock in 1i64..500, quantity in 1i64..500) {
            prop_assume!(quantity <= stock);

            let mut store = Store::new(vec![ProductState {
                id: 1,
                current_stock: stock,
                price: dec("10.00"),
                unit_profit: dec("4.00"),
            }]);
            let original = store.clone();

            let sale_id = store.register_sale(1, quantity).unwrap();
            store.delete_sale(sale_id).unwrap();

            // next_sale_id advances, everything else is restored
            prop_assert_eq!(store.products, original.products);
            prop_assert_eq!(store.sales, original.sales);
        }

        /// Stock plus the quantities of all registered sales is conserved
        #[test]
        fn prop_stock_conservation(
            stock in 1i64..1000,
            quantities in prop::collection::vec(1i64..50, 0..20)
        ) {
            let mut store = Store::new(vec![ProductState {
                id: 1,
                current_stock: stock,
                price: dec("10.00"),
                unit_profit: dec("4.00"),
            }]);

            for quantity in quantities {
                let _ = store.register_sale(1, quantity);
            }

            let sold: i64 = store.sales.iter().map(|s| s.quantity).sum();
            prop_assert_eq!(store.stock_of(1) + sold, stock);
            prop_assert!(store.stock_of(1) >= 0);
        }

        /// A failed registration mutates nothing
        #[test]
        fn prop_failed_register_is_noop(stock in 1i64..100, excess in 1i64..100) {
            let mut store = Store::new(vec![ProductState {
                id: 1,
                current_stock: stock,
                price: dec("10.00"),
                unit_profit: dec("4.00"),
            }]);
            let original = store.clone();

            prop_assert!(store.register_sale(1, stock + excess).is_err());
            prop_assert_eq!(store, original);
        }
    }
}
