use crate::commands::CmdResult;
use crate::error::Result;
use crate::sanitize::escape_html;
use crate::store::DataStore;

/// Product whose barcode equals `sku`. A non-numeric code matches nothing.
pub fn by_sku<S: DataStore>(store: &S, sku: &str) -> Result<CmdResult> {
    let Ok(barcode) = escape_html(sku.trim()).parse::<i64>() else {
        return Ok(CmdResult::default());
    };
    let found = store
        .find_products(&|p| p.barcode == barcode)?
        .into_iter()
        .take(1)
        .collect();
    Ok(CmdResult::default().with_listed_products(found))
}

/// Products whose name contains `term`, ignoring case.
///
/// Stored names are escaped, so the term is escaped the same way before matching.
pub fn by_name<S: DataStore>(store: &S, term: &str) -> Result<CmdResult> {
    let needle = escape_html(term).to_lowercase();
    let found = store.find_products(&|p| p.name.to_lowercase().contains(&needle))?;
    Ok(CmdResult::default().with_listed_products(found))
}
