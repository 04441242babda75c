//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for every inventory operation, whether the caller is the CLI or the HTTP
//! server.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries per-instance settings** (data paths, import options)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal output and no HTTP concerns.
//!
//! ## Generic Over DataStore
//!
//! `InventoryApi<S: DataStore>` is generic over the storage backend:
//! - Production: `InventoryApi<Catalog<FsBackend>>`
//! - Testing: `InventoryApi<Catalog<MemBackend>>`
//!
//! Tests here only check dispatch; command behavior is tested in `commands/`.

use crate::commands;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, StockPaths};
use crate::error::Result;
use crate::import::ImportOptions;
use crate::model::ProductId;
use crate::store::DataStore;
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ListFilter;
pub use crate::commands::save::ProductForm;
pub use crate::commands::stock::Sale;

/// The main API facade for inventory operations.
pub struct InventoryApi<S: DataStore> {
    store: S,
    paths: StockPaths,
    import_options: ImportOptions,
}

impl<S: DataStore> InventoryApi<S> {
    pub fn new(store: S, paths: StockPaths) -> Self {
        Self {
            store,
            paths,
            import_options: ImportOptions::default(),
        }
    }

    pub fn with_import_options(mut self, options: ImportOptions) -> Self {
        self.import_options = options;
        self
    }

    pub fn get_product(&self, id: ProductId) -> Result<CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn list_products(&self, filter: ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn save_product(&mut self, form: &ProductForm, uploaded: Option<&str>) -> Result<CmdResult> {
        commands::save::run(&mut self.store, &self.paths, form, uploaded)
    }

    pub fn delete_product(&mut self, id: ProductId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn find_by_sku(&self, sku: &str) -> Result<CmdResult> {
        commands::search::by_sku(&self.store, sku)
    }

    pub fn search_by_name(&self, term: &str) -> Result<CmdResult> {
        commands::search::by_name(&self.store, term)
    }

    pub fn import_csv(&mut self, text: &str) -> Result<CmdResult> {
        commands::import::run(&mut self.store, text, &self.import_options)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::from_file(&mut self.store, path, &self.import_options)
    }

    pub fn preview_file(&self, path: &Path) -> Result<CmdResult> {
        commands::import::preview_file(path)
    }

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::categories::run(&self.store)
    }

    pub fn decrement_inventory(&mut self, sales: &[Sale]) -> Result<CmdResult> {
        commands::stock::decrement(&mut self.store, sales)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn paths(&self) -> &StockPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::Catalog;

    fn api(dir: &Path) -> InventoryApi<Catalog<MemBackend>> {
        InventoryApi::new(Catalog::with_backend(MemBackend::new()), StockPaths::new(dir))
    }

    #[test]
    fn import_then_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());

        api.import_csv("id,name,barcode,category\n1,Green Tea,400,Drinks\n")
            .unwrap();

        assert_eq!(api.get_product(1).unwrap().listed_products.len(), 1);
        assert_eq!(api.find_by_sku("400").unwrap().listed_products.len(), 1);
        assert_eq!(api.search_by_name("green").unwrap().listed_products.len(), 1);
        assert_eq!(api.list_categories().unwrap().categories.len(), 1);
        assert_eq!(api.list_products(ListFilter::All).unwrap().listed_products.len(), 1);
    }

    #[test]
    fn import_uses_configured_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path()).with_import_options(ImportOptions {
            fallback_category: "misc".into(),
        });

        api.import_csv("id,name\n1,a\n").unwrap();
        let product = &api.get_product(1).unwrap().listed_products[0];
        assert_eq!(product.category, "misc");
    }

    #[test]
    fn save_sell_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());

        let mut form = ProductForm::default();
        form.set("id", "3".into());
        form.set("name", "Mug".into());
        form.set("quantity", "5".into());
        api.save_product(&form, None).unwrap();

        api.decrement_inventory(&[Sale { id: 3, quantity: 2 }]).unwrap();
        assert_eq!(api.get_product(3).unwrap().listed_products[0].quantity, 3);

        api.delete_product(3).unwrap();
        assert!(api.get_product(3).unwrap().listed_products.is_empty());
    }
}
