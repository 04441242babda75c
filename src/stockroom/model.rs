use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Numeric product identity (the document `_id`).
pub type ProductId = i64;

/// `stock` value when the form toggle was switched on ("marked out of stock").
pub const STOCK_MARKED_OUT: u8 = 0;
/// `stock` value for every other toggle state.
pub const STOCK_IN: u8 = 1;

/// Category assigned to products imported without one.
pub const FALLBACK_CATEGORY: &str = "other";

/// Format used by `expirationDate`, e.g. `07-Mar-2026`.
pub const EXPIRY_DATE_FORMAT: &str = "%d-%b-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub barcode: i64,
    pub expiration_date: String,
    pub price: String,
    pub category: String,
    pub quantity: i64,
    pub name: String,
    pub stock: u8,
    pub min_stock: String,
    pub img: String,
    pub cost_price: String,
    pub profit_margin: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            barcode: 0,
            expiration_date: String::new(),
            price: String::new(),
            category: String::new(),
            quantity: 0,
            name: name.into(),
            stock: STOCK_IN,
            min_stock: String::new(),
            img: String::new(),
            cost_price: String::new(),
            profit_margin: String::new(),
        }
    }

    /// Stock level relative to `minStock`. An unparseable minimum counts as zero.
    pub fn stock_status(&self) -> StockStatus {
        let minimum = self.min_stock.trim().parse::<i64>().unwrap_or(0);
        StockStatus::evaluate(self.quantity, minimum)
    }

    /// Parsed `expirationDate`, if it is set and well formed.
    pub fn expiry(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.expiration_date.trim(), EXPIRY_DATE_FORMAT).ok()
    }

    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry().is_some_and(|date| today >= date)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Utc::now().date_naive())
    }

    /// Whole days until expiry; 0 once the date is today or has passed.
    pub fn days_to_expire_on(&self, today: NaiveDate) -> Option<i64> {
        self.expiry()
            .map(|date| (date - today).num_days().max(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Out,
    Low,
    Normal,
}

impl StockStatus {
    pub fn evaluate(current: i64, minimum: i64) -> Self {
        if current <= 0 {
            StockStatus::Out
        } else if current <= minimum {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn product_serializes_with_document_field_names() {
        let mut product = Product::new(42, "Widget");
        product.cost_price = "3.50".into();
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["_id"], 42);
        assert_eq!(json["costPrice"], "3.50");
        assert_eq!(json["minStock"], "");
        assert_eq!(json["expirationDate"], "");
        assert_eq!(json["stock"], 1);
    }

    #[test]
    fn stock_status_levels() {
        assert_eq!(StockStatus::evaluate(0, 5), StockStatus::Out);
        assert_eq!(StockStatus::evaluate(-2, 0), StockStatus::Out);
        assert_eq!(StockStatus::evaluate(5, 5), StockStatus::Low);
        assert_eq!(StockStatus::evaluate(6, 5), StockStatus::Normal);
    }

    #[test]
    fn stock_status_ignores_garbage_minimum() {
        let mut product = Product::new(1, "Bolt");
        product.quantity = 3;
        product.min_stock = "lots".into();
        assert_eq!(product.stock_status(), StockStatus::Normal);
    }

    #[test]
    fn expiry_is_parsed_and_compared() {
        let mut product = Product::new(1, "Milk");
        product.expiration_date = "10-Mar-2026".into();

        assert_eq!(product.expiry(), Some(date(2026, 3, 10)));
        assert!(!product.is_expired_on(date(2026, 3, 9)));
        assert!(product.is_expired_on(date(2026, 3, 10)));
        assert_eq!(product.days_to_expire_on(date(2026, 3, 1)), Some(9));
        assert_eq!(product.days_to_expire_on(date(2026, 4, 1)), Some(0));
    }

    #[test]
    fn missing_expiry_never_expires() {
        let product = Product::new(1, "Nails");
        assert_eq!(product.expiry(), None);
        assert!(!product.is_expired_on(date(2099, 1, 1)));
        assert_eq!(product.days_to_expire_on(date(2026, 1, 1)), None);
    }
}
