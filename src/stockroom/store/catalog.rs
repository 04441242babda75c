use super::backend::StorageBackend;
use super::DataStore;
use crate::error::{Result, StockError};
use crate::model::{Category, Product, ProductId};

pub const PRODUCTS: &str = "products";
pub const CATEGORIES: &str = "categories";

/// Key-enforcing document store over a raw [`StorageBackend`].
///
/// Every operation is load → modify → save on a whole collection, so each call
/// is a self-contained unit; there are no multi-document transactions.
pub struct Catalog<B: StorageBackend> {
    pub(crate) backend: B,
}

impl<B: StorageBackend> Catalog<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for Catalog<B> {
    fn find_product(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.backend.load_products()?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    fn find_products(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>> {
        let products = self.backend.load_products()?;
        Ok(products.into_iter().filter(|p| predicate(p)).collect())
    }

    fn insert_product(&mut self, product: &Product) -> Result<()> {
        let mut products = self.backend.load_products()?;
        if products.iter().any(|p| p.id == product.id) {
            return Err(StockError::DuplicateKey {
                collection: PRODUCTS,
                key: product.id.to_string(),
            });
        }
        products.push(product.clone());
        self.backend.save_products(&products)
    }

    fn update_product(&mut self, product: &Product) -> Result<bool> {
        let mut products = self.backend.load_products()?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                self.backend.save_products(&products)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_product(&mut self, id: ProductId) -> Result<bool> {
        let mut products = self.backend.load_products()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.backend.save_products(&products)?;
        Ok(true)
    }

    fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let categories = self.backend.load_categories()?;
        Ok(categories.into_iter().find(|c| c.name == name))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        self.backend.load_categories()
    }

    fn insert_category(&mut self, category: &Category) -> Result<()> {
        let mut categories = self.backend.load_categories()?;
        if categories.iter().any(|c| c.name == category.name) {
            return Err(StockError::DuplicateKey {
                collection: CATEGORIES,
                key: format!("name={}", category.name),
            });
        }
        if categories.iter().any(|c| c.id == category.id) {
            return Err(StockError::DuplicateKey {
                collection: CATEGORIES,
                key: format!("id={}", category.id),
            });
        }
        categories.push(category.clone());
        self.backend.save_categories(&categories)
    }

    fn remove_category(&mut self, id: i64) -> Result<bool> {
        let mut categories = self.backend.load_categories()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Ok(false);
        }
        self.backend.save_categories(&categories)?;
        Ok(true)
    }
}
