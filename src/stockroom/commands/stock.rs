use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::ProductId;
use crate::store::DataStore;
use tracing::debug;

/// Units of one product sold in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sale {
    pub id: ProductId,
    pub quantity: i64,
}

/// Subtract sold quantities, one product at a time, in the order given.
///
/// Unknown products and products already at zero are left untouched. A sale that
/// would push the quantity past the range of `i64` stops the run with
/// `InvalidNumeric`; earlier sales stay applied.
pub fn decrement<S: DataStore>(store: &mut S, sales: &[Sale]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for sale in sales {
        let Some(mut product) = store.find_product(sale.id)? else {
            result.add_message(CmdMessage::warning(format!(
                "No product with id {}",
                sale.id
            )));
            continue;
        };
        if product.quantity == 0 {
            debug!(id = sale.id, "quantity already zero, not decremented");
            continue;
        }

        product.quantity = product.quantity.checked_sub(sale.quantity).ok_or_else(|| {
            StockError::InvalidNumeric {
                field: "quantity",
                value: sale.quantity.to_string(),
            }
        })?;
        store.update_product(&product)?;
        result.add_message(CmdMessage::success(format!(
            "{}: {} left",
            product.name, product.quantity
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

    fn with_quantity(store: &mut Catalog<MemBackend>, id: ProductId, quantity: i64) {
        let mut product = Product::new(id, format!("p{id}"));
        product.quantity = quantity;
        store.insert_product(&product).unwrap();
    }

    #[test]
    fn subtracts_sold_units() {
        let mut store = Catalog::with_backend(MemBackend::new());
        with_quantity(&mut store, 1, 10);
        with_quantity(&mut store, 2, 3);

        let result = decrement(
            &mut store,
            &[Sale { id: 1, quantity: 4 }, Sale { id: 2, quantity: 1 }],
        )
        .unwrap();

        assert_eq!(result.affected_products.len(), 2);
        assert_eq!(store.find_product(1).unwrap().unwrap().quantity, 6);
        assert_eq!(store.find_product(2).unwrap().unwrap().quantity, 2);
    }

    #[test]
    fn repeated_sales_accumulate() {
        let mut store = Catalog::with_backend(MemBackend::new());
        with_quantity(&mut store, 1, 10);
        decrement(
            &mut store,
            &[Sale { id: 1, quantity: 2 }, Sale { id: 1, quantity: 3 }],
        )
        .unwrap();
        assert_eq!(store.find_product(1).unwrap().unwrap().quantity, 5);
    }

    #[test]
    fn overflowing_sale_is_rejected() {
        let mut store = Catalog::with_backend(MemBackend::new());
        with_quantity(&mut store, 1, 5);

        let err = decrement(&mut store, &[Sale { id: 1, quantity: i64::MIN }]).unwrap_err();

        assert!(matches!(err, StockError::InvalidNumeric { field: "quantity", .. }));
        assert_eq!(store.find_product(1).unwrap().unwrap().quantity, 5);
    }

    #[test]
    fn skips_missing_and_empty_products() {
        let mut store = Catalog::with_backend(MemBackend::new());
        with_quantity(&mut store, 1, 0);

        let result = decrement(
            &mut store,
            &[Sale { id: 1, quantity: 1 }, Sale { id: 9, quantity: 1 }],
        )
        .unwrap();

        assert!(result.affected_products.is_empty());
        assert_eq!(store.find_product(1).unwrap().unwrap().quantity, 0);
        assert_eq!(result.messages.len(), 1);
    }
}
