use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::import::{self, ImportOptions};
use crate::store::DataStore;
use std::fs;
use std::path::Path;

/// Import CSV text into the catalog.
pub fn run<S: DataStore>(store: &mut S, text: &str, options: &ImportOptions) -> Result<CmdResult> {
    let summary = import::run(store, text, options)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} products ({} new, {} updated)",
        summary.committed(),
        summary.inserted,
        summary.updated
    )));
    for rejected in &summary.rejected {
        result.add_message(CmdMessage::warning(format!(
            "Line {} skipped: {}",
            rejected.line, rejected.reason
        )));
    }
    Ok(result.with_summary(summary))
}

/// Import a CSV file from disk.
pub fn from_file<S: DataStore>(
    store: &mut S,
    path: &Path,
    options: &ImportOptions,
) -> Result<CmdResult> {
    let text = read_text(path)?;
    run(store, &text, options)
}

/// Unique category names a file would bring in. Nothing is written.
pub fn preview(text: &str) -> Result<CmdResult> {
    let names = import::preview_categories(text)?;
    let mut result = CmdResult::default();
    if names.is_empty() {
        result.add_message(CmdMessage::info("No categories found"));
    }
    Ok(result.with_category_names(names))
}

pub fn preview_file(path: &Path) -> Result<CmdResult> {
    preview(&read_text(path)?)
}

/// Whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|_| StockError::Upload(format!("{} is not valid UTF-8", path.display())))
}
