//! # Storage Layer
//!
//! The catalog is a small document store with two collections, **products** and
//! **categories**. The [`DataStore`] trait is the contract the rest of the crate
//! programs against; nothing above this layer knows how documents are persisted.
//!
//! ## Collections and Keys
//!
//! | Collection | Key    | Also unique |
//! |------------|--------|-------------|
//! | products   | `_id`  |             |
//! | categories | `id`   | `name`      |
//!
//! Inserting a document whose key (or category name) already exists fails with
//! [`StockError::DuplicateKey`](crate::error::StockError::DuplicateKey). Updates are
//! full replacements keyed by identity, never field-level merges.
//!
//! ## Layering
//!
//! - [`backend::StorageBackend`]: raw load/save of whole collections.
//! - [`catalog::Catalog`]: implements [`DataStore`] over any backend, enforcing keys.
//!
//! Backends:
//! - [`fs_backend::FsBackend`]: JSON files, atomic tmp+rename writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── products.json     # Products collection (JSON array)
//! ├── categories.json   # Categories collection (JSON array)
//! ├── config.json       # Configuration
//! └── uploads/          # Uploaded images and CSV files
//! ```

use crate::error::Result;
use crate::model::{Category, Product, ProductId};

pub mod backend;
pub mod catalog;
pub mod fs_backend;
pub mod mem_backend;

pub use catalog::Catalog;

/// Abstract interface for the catalog document store.
pub trait DataStore {
    /// Find a product by identity
    fn find_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Find every product matching a predicate, in stored order
    fn find_products(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>>;

    /// List all products
    fn list_products(&self) -> Result<Vec<Product>> {
        self.find_products(&|_| true)
    }

    /// Insert a new product. Fails with `DuplicateKey` if the id exists.
    fn insert_product(&mut self, product: &Product) -> Result<()>;

    /// Replace the product with the same id. Returns false if none exists.
    fn update_product(&mut self, product: &Product) -> Result<bool>;

    /// Remove a product by id. Returns false if none exists.
    fn remove_product(&mut self, id: ProductId) -> Result<bool>;

    /// Find a category by exact name
    fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// List all categories
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Insert a new category. Fails with `DuplicateKey` if the id or name exists.
    fn insert_category(&mut self, category: &Category) -> Result<()>;

    /// Remove a category by id. Returns false if none exists.
    fn remove_category(&mut self, id: i64) -> Result<bool>;
}
