use super::backend::StorageBackend;
use crate::error::{Result, StockError};
use crate::model::{Category, Product};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PRODUCTS_FILE: &str = "products.json";
const CATEGORIES_FILE: &str = "categories.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StockError::Io)?;
        }
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(StockError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let docs: Vec<T> = serde_json::from_str(&content).map_err(StockError::Serialization)?;
        Ok(docs)
    }

    fn save_collection<T: Serialize>(&self, file: &str, docs: &[T]) -> Result<()> {
        self.ensure_dir()?;

        let target = self.root.join(file);
        let content = serde_json::to_string_pretty(docs).map_err(StockError::Serialization)?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", file, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(StockError::Io)?;
        fs::rename(&tmp, target).map_err(StockError::Io)?;

        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        self.load_collection(PRODUCTS_FILE)
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        self.save_collection(PRODUCTS_FILE, products)
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        self.load_collection(CATEGORIES_FILE)
    }

    fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.save_collection(CATEGORIES_FILE, categories)
    }
}
