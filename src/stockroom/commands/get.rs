use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductId;
use crate::store::DataStore;

/// Look up one product. A missing id is not an error: the result is simply empty.
pub fn run<S: DataStore>(store: &S, id: ProductId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.find_product(id)? {
        Some(product) => result.listed_products.push(product),
        None => result.add_message(CmdMessage::warning(format!("No product with id {id}"))),
    }
    Ok(result)
}
