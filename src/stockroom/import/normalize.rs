//! Product normalizer: one header-keyed record to a candidate `Product`, plus the id clock.

use super::records::Record;
use crate::error::{Result, StockError};
use crate::model::{Product, ProductId, STOCK_IN, STOCK_MARKED_OUT};
use crate::sanitize::{escape_html, sanitize_filename};
use chrono::Utc;

/// Token of the stock toggle that marks a product as out of stock.
const STOCK_TOGGLE_ON: &str = "on";

fn now_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Issues timestamp-derived product ids that never repeat.
///
/// Each id is the current unix second, bumped past the last id issued or observed,
/// so several id-less rows inside the same second still get distinct ids.
#[derive(Debug, Clone)]
pub struct IdClock {
    last: ProductId,
    now: fn() -> i64,
}

impl Default for IdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl IdClock {
    pub fn new() -> Self {
        Self {
            last: 0,
            now: now_seconds,
        }
    }

    /// Start above `floor` (typically the highest id already stored).
    pub fn seeded(floor: ProductId) -> Self {
        Self {
            last: floor,
            ..Self::new()
        }
    }

    pub fn with_time_source(mut self, now: fn() -> i64) -> Self {
        self.now = now;
        self
    }

    pub fn next_id(&mut self) -> ProductId {
        let id = (self.now)().max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Record an explicit id so later generated ids stay above it.
    pub fn observe(&mut self, id: ProductId) {
        self.last = self.last.max(id);
    }
}

/// Build a candidate product from one record.
///
/// The category is escaped but not yet resolved against the catalog.
pub fn normalize(record: &Record, clock: &mut IdClock) -> Result<Product> {
    let raw_id = escape_html(record.get("id"));
    let id = if raw_id.is_empty() {
        clock.next_id()
    } else {
        let id = raw_id
            .parse::<ProductId>()
            .map_err(|_| StockError::InvalidIdentity(raw_id.clone()))?;
        clock.observe(id);
        id
    };

    let img = if escape_html(record.get("img")).is_empty() {
        String::new()
    } else {
        sanitize_filename(record.get("img"))
    };

    Ok(Product {
        id,
        barcode: parse_count(record, "barcode")?,
        expiration_date: escape_html(record.get("expirationDate")),
        price: escape_html(record.get("price")),
        category: escape_html(record.get("category")),
        quantity: parse_count(record, "quantity")?,
        name: escape_html(record.get("name")),
        stock: stock_flag(record.get("stock")),
        min_stock: escape_html(record.get("minStock")),
        img,
        cost_price: escape_html(record.get("costPrice")),
        profit_margin: escape_html(record.get("profitMargin")),
    })
}

/// `"on"` means the product was explicitly marked out of stock.
pub fn stock_flag(toggle: &str) -> u8 {
    if toggle == STOCK_TOGGLE_ON {
        STOCK_MARKED_OUT
    } else {
        STOCK_IN
    }
}

fn parse_count(record: &Record, field: &'static str) -> Result<i64> {
    parse_number(field, record.get(field))
}

/// Escaped integer field; blank means zero.
pub(crate) fn parse_number(field: &'static str, raw: &str) -> Result<i64> {
    let value = escape_html(raw);
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<i64>()
        .map_err(|_| StockError::InvalidNumeric { field, value })
}
