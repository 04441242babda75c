use crate::error::Result;
use crate::model::{Category, Product};

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `Catalog` handles the "what" (key lookup, uniqueness, replacement).
pub trait StorageBackend {
    // --- Products ---

    /// Load the products collection, in stored order.
    fn load_products(&self) -> Result<Vec<Product>>;

    /// Persist the whole products collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_products(&self, products: &[Product]) -> Result<()>;

    // --- Categories ---

    /// Load the categories collection, in stored order.
    fn load_categories(&self) -> Result<Vec<Category>>;

    /// Persist the whole categories collection. Same atomicity rule as products.
    fn save_categories(&self, categories: &[Category]) -> Result<()>;
}
