use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, id: ProductId) -> Result<CmdResult> {
    let existing = store.find_product(id)?;
    let mut result = CmdResult::default();

    if !store.remove_product(id)? {
        result.add_message(CmdMessage::warning(format!("No product with id {id}")));
        return Ok(result);
    }

    if let Some(product) = existing {
        result.add_message(CmdMessage::success(format!(
            "Product deleted ({}): {}",
            product.id, product.name
        )));
        result.affected_products.push(product);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::store::mem_backend::MemBackend;
    use crate::store::Catalog;

    #[test]
    fn removes_product() {
        let mut store = Catalog::with_backend(MemBackend::new());
        store.insert_product(&Product::new(1, "a")).unwrap();
        store.insert_product(&Product::new(2, "b")).unwrap();

        let result = run(&mut store, 1).unwrap();
        assert_eq!(result.affected_products.len(), 1);
        let remaining: Vec<_> = store.list_products().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![2]);
    }

    #[test]
    fn missing_product_is_not_an_error() {
        let mut store = Catalog::with_backend(MemBackend::new());
        let result = run(&mut store, 1).unwrap();
        assert!(result.affected_products.is_empty());
        assert!(!result.has_errors());
    }
}
