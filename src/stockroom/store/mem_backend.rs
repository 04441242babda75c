use super::backend::StorageBackend;
use crate::error::{Result, StockError};
use crate::model::{Category, Product};
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability; every catalog operation runs on one
/// thread at a time (the server serializes access behind a mutex).
#[derive(Default)]
pub struct MemBackend {
    products: RefCell<Vec<Product>>,
    categories: RefCell<Vec<Category>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(StockError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.borrow().clone())
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        self.check_writable()?;
        *self.products.borrow_mut() = products.to_vec();
        Ok(())
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.borrow().clone())
    }

    fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.check_writable()?;
        *self.categories.borrow_mut() = categories.to_vec();
        Ok(())
    }
}
