//! Input validation for products and sales
//!
//! The same rules apply on insert and edit, and to every storage backend:
//! text fields must be non-empty after trimming, numeric fields strictly
//! positive, and the current stock can never exceed the initial stock.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ProductDraft;

/// A rejected field together with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a product draft before it is written to any store.
///
/// Returns the first offending field; no partial acceptance.
pub fn validate_product(draft: &ProductDraft<'_>) -> Result<(), ValidationError> {
    let text_fields = [
        ("name", draft.name),
        ("code", draft.code),
        ("photo", draft.photo),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            return Err(ValidationError::new(
                field,
                format!("field '{field}' cannot be empty"),
            ));
        }
    }

    let money_fields = [("price", draft.price), ("unit_profit", draft.unit_profit)];
    for (field, value) in money_fields {
        if value <= Decimal::ZERO {
            return Err(ValidationError::new(
                field,
                format!("field '{field}' must be greater than zero"),
            ));
        }
    }

    let stock_fields = [
        ("initial_stock", draft.initial_stock),
        ("current_stock", draft.current_stock),
    ];
    for (field, value) in stock_fields {
        if value <= 0 {
            return Err(ValidationError::new(
                field,
                format!("field '{field}' must be greater than zero"),
            ));
        }
    }

    if draft.current_stock > draft.initial_stock {
        return Err(ValidationError::new(
            "current_stock",
            "current stock cannot exceed initial stock",
        ));
    }

    Ok(())
}

/// Validate the quantity of a sale being registered
pub fn validate_sale_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::new(
            "quantity",
            "quantity must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft<'static> {
        ProductDraft {
            name: "Vestido Midi",
            code: "NF-0042",
            photo: "imagens/042.jpg",
            price: Decimal::new(12990, 2),
            unit_profit: Decimal::new(4500, 2),
            initial_stock: 10,
            current_stock: 4,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(validate_product(&valid_draft()).is_ok());
    }

    #[test]
    fn test_empty_text_fields_name_the_field() {
        for field in ["name", "code", "photo"] {
            let mut draft = valid_draft();
            match field {
                "name" => draft.name = "",
                "code" => draft.code = "",
                _ => draft.photo = "",
            }
            let err = validate_product(&draft).unwrap_err();
            assert_eq!(err.field, field);
        }
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        let mut draft = valid_draft();
        draft.name = "   ";
        let err = validate_product(&draft).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_non_positive_money_fields_name_the_field() {
        let mut draft = valid_draft();
        draft.price = Decimal::ZERO;
        assert_eq!(validate_product(&draft).unwrap_err().field, "price");

        let mut draft = valid_draft();
        draft.unit_profit = Decimal::new(-100, 2);
        assert_eq!(validate_product(&draft).unwrap_err().field, "unit_profit");
    }

    #[test]
    fn test_non_positive_stock_fields_name_the_field() {
        let mut draft = valid_draft();
        draft.initial_stock = 0;
        assert_eq!(validate_product(&draft).unwrap_err().field, "initial_stock");

        let mut draft = valid_draft();
        draft.current_stock = -3;
        assert_eq!(validate_product(&draft).unwrap_err().field, "current_stock");
    }

    #[test]
    fn test_current_stock_cannot_exceed_initial() {
        let mut draft = valid_draft();
        draft.initial_stock = 4;
        draft.current_stock = 10;
        let err = validate_product(&draft).unwrap_err();
        assert_eq!(err.field, "current_stock");
        assert!(err.message.contains("initial stock"));
    }

    #[test]
    fn test_sale_quantity_bounds() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(25).is_ok());
        assert_eq!(validate_sale_quantity(0).unwrap_err().field, "quantity");
        assert_eq!(validate_sale_quantity(-5).unwrap_err().field, "quantity");
    }
}
