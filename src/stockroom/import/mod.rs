//! # Bulk Import Engine
//!
//! Turns an uploaded delimited-text file into catalog writes:
//!
//! ```text
//! raw text ─► records ─► normalize ─► category ─► upsert ─► ImportSummary
//!            (parser)   (Product)    (resolver)  (store)
//! ```
//!
//! - [`records`]: header-keyed rows from plain comma-separated text.
//! - [`normalize`]: one row → candidate [`Product`](crate::model::Product), with
//!   escaping, defaults and generated ids ([`normalize::IdClock`]).
//! - [`category`]: canonical category names, creating categories lazily.
//! - [`upsert`]: the sequential fold committing each product and tallying results.
//!
//! ## Failure Model
//!
//! Only an unreadable or empty input aborts the batch. Everything that goes wrong
//! with a single row (bad identity, bad number, store error) is logged, listed in
//! [`ImportSummary::rejected`] and skipped. Rows are processed strictly in order,
//! one at a time, so a category created by an earlier row is visible to every
//! later row of the same batch.

use crate::error::Result;
use crate::model::FALLBACK_CATEGORY;
use crate::store::DataStore;
use tracing::{info, warn};

pub mod category;
pub mod normalize;
pub mod records;
pub mod upsert;

pub use category::CategoryResolver;
pub use normalize::IdClock;
pub use records::{Record, RecordParser};
pub use upsert::{ImportSummary, RejectedRow, Sequencer, UpsertOutcome};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Category given to rows that have none.
    pub fallback_category: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fallback_category: FALLBACK_CATEGORY.to_string(),
        }
    }
}

/// Import a whole batch. Fails only when `text` has no rows at all.
pub fn run<S: DataStore>(store: &mut S, text: &str, options: &ImportOptions) -> Result<ImportSummary> {
    let parser = RecordParser::new(text)?;

    let clock = match highest_product_id(store) {
        Ok(floor) => IdClock::seeded(floor),
        Err(e) => {
            warn!(error = %e, "could not read existing ids, generating from the clock alone");
            IdClock::new()
        }
    };
    let mut sequencer = Sequencer::new(
        clock,
        CategoryResolver::new(options.fallback_category.clone()),
    );

    let summary = sequencer.run(store, parser.records());
    info!(
        inserted = summary.inserted,
        updated = summary.updated,
        rejected = summary.rejected.len(),
        categories_created = sequencer.resolver().created(),
        "import finished"
    );
    Ok(summary)
}

pub(crate) fn highest_product_id<S: DataStore>(store: &S) -> Result<i64> {
    Ok(store
        .list_products()?
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0))
}

/// Unique non-empty values of the `category` column (header matched
/// case-insensitively), in first-seen order. Nothing is written.
pub fn preview_categories(text: &str) -> Result<Vec<String>> {
    let parser = RecordParser::new(text)?;
    let Some(column) = parser
        .header()
        .iter()
        .find(|h| h.eq_ignore_ascii_case("category"))
        .cloned()
    else {
        return Ok(Vec::new());
    };

    let mut seen = Vec::new();
    for record in parser.records() {
        let value = record.get(&column);
        if !value.is_empty() && !seen.iter().any(|s: &String| s == value) {
            seen.push(value.to_string());
        }
    }
    Ok(seen)
}
