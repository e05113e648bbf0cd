//! Spreadsheet-backed product store
//!
//! Alternate storage backend with the same read/validate/write contract as
//! the database-backed catalog: the whole table is loaded, mutated in
//! memory, and written back to the file. Used by shops that keep their
//! catalog in a local spreadsheet instead of the hosted database.

use std::path::{Path, PathBuf};

use shared::validation::validate_product;

use crate::error::{AppError, AppResult};
use crate::services::product::{Product, ProductInput};

/// CSV-file product store
#[derive(Debug, Clone)]
pub struct SpreadsheetStore {
    path: PathBuf,
}

fn storage_err(err: impl std::fmt::Display) -> AppError {
    AppError::Storage(err.to_string())
}

impl SpreadsheetStore {
    /// Create a store over the given spreadsheet file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole product table. A missing file is an empty catalog.
    pub fn load(&self) -> AppResult<Vec<Product>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(storage_err)?;
        reader
            .deserialize()
            .collect::<Result<Vec<Product>, _>>()
            .map_err(storage_err)
    }

    /// Write the whole product table back to the file
    pub fn save(&self, products: &[Product]) -> AppResult<()> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(storage_err)?;
        for product in products {
            writer.serialize(product).map_err(storage_err)?;
        }
        writer.flush().map_err(storage_err)
    }

    /// Insert a new product after validation; ids are assigned locally
    pub fn insert(&self, input: ProductInput) -> AppResult<Product> {
        validate_product(&input.draft())?;

        let mut products = self.load()?;
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: input.name,
            code: input.code,
            price: input.price,
            unit_profit: input.unit_profit,
            initial_stock: input.initial_stock,
            current_stock: input.current_stock,
            photo: input.photo,
        };
        products.push(product.clone());
        self.save(&products)?;
        Ok(product)
    }

    /// Update a product by id after validation
    pub fn update(&self, id: i64, input: ProductInput) -> AppResult<Product> {
        validate_product(&input.draft())?;

        let mut products = self.load()?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        slot.name = input.name;
        slot.code = input.code;
        slot.price = input.price;
        slot.unit_profit = input.unit_profit;
        slot.initial_stock = input.initial_stock;
        slot.current_stock = input.current_stock;
        slot.photo = input.photo;
        let updated = slot.clone();

        self.save(&products)?;
        Ok(updated)
    }

    /// Delete a product by id
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut products = self.load()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::NotFound("Product".to_string()));
        }
        self.save(&products)
    }
}
