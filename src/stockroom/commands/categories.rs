use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let categories = store.list_categories()?;
    Ok(CmdResult::default().with_categories(categories))
}
