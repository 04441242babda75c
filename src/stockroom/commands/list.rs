use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::StockStatus;
use crate::store::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    /// Only products at or below their minimum stock, including empty ones.
    LowStock,
    /// Only products whose expiration date is today or earlier.
    Expired,
}

pub fn run<S: DataStore>(store: &S, filter: ListFilter) -> Result<CmdResult> {
    let products = match filter {
        ListFilter::All => store.list_products()?,
        ListFilter::LowStock => {
            store.find_products(&|p| p.stock_status() != StockStatus::Normal)?
        }
        ListFilter::Expired => store.find_products(&|p| p.is_expired())?,
    };
    Ok(CmdResult::default().with_listed_products(products))
}
