use crate::commands::{CmdMessage, CmdResult, StockPaths};
use crate::error::{Result, StockError};
use crate::import::normalize::{parse_number, stock_flag};
use crate::import::upsert::{upsert_product, UpsertOutcome};
use crate::import::{highest_product_id, IdClock};
use crate::model::{Product, ProductId};
use crate::sanitize::{escape_html, sanitize_filename};
use crate::store::DataStore;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Value of the `remove` field that asks for the stored image to be deleted.
const REMOVE_IMAGE: &str = "1";

/// Raw text fields of the single-product form, exactly as submitted.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub id: String,
    pub barcode: String,
    pub expiration_date: String,
    pub price: String,
    pub category: String,
    pub quantity: String,
    pub name: String,
    pub stock: String,
    pub min_stock: String,
    pub img: String,
    pub cost_price: String,
    pub profit_margin: String,
    pub remove: String,
}

impl ProductForm {
    /// Assign a form field by its wire name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "id" => &mut self.id,
            "barcode" => &mut self.barcode,
            "expirationDate" => &mut self.expiration_date,
            "price" => &mut self.price,
            "category" => &mut self.category,
            "quantity" => &mut self.quantity,
            "name" => &mut self.name,
            "stock" => &mut self.stock,
            "minStock" => &mut self.min_stock,
            "img" => &mut self.img,
            "cost_price" => &mut self.cost_price,
            "profit_margin" => &mut self.profit_margin,
            "remove" => &mut self.remove,
            _ => return,
        };
        *slot = value;
    }
}

/// Save one product from form input.
///
/// A blank id inserts under a generated id; any other id fully replaces the stored
/// product, inserting it if absent. `uploaded` is the stored name of an image that
/// arrived with the form and always wins over the `img` field.
pub fn run<S: DataStore>(
    store: &mut S,
    paths: &StockPaths,
    form: &ProductForm,
    uploaded: Option<&str>,
) -> Result<CmdResult> {
    let mut img = match uploaded {
        Some(name) => sanitize_filename(name),
        None if escape_html(&form.img).is_empty() => String::new(),
        None => sanitize_filename(&form.img),
    };

    // The file goes only once the cleared record is stored.
    let removed = if uploaded.is_none() && escape_html(&form.remove) == REMOVE_IMAGE {
        std::mem::take(&mut img)
    } else {
        String::new()
    };

    let raw_id = escape_html(&form.id);
    let id = if raw_id.is_empty() {
        IdClock::seeded(highest_product_id(store)?).next_id()
    } else {
        raw_id
            .parse::<ProductId>()
            .map_err(|_| StockError::InvalidIdentity(raw_id.clone()))?
    };

    let product = Product {
        id,
        barcode: parse_number("barcode", &form.barcode)?,
        expiration_date: escape_html(&form.expiration_date),
        price: escape_html(&form.price),
        category: escape_html(&form.category),
        quantity: parse_number("quantity", &form.quantity)?,
        name: escape_html(&form.name),
        stock: stock_flag(&form.stock),
        min_stock: escape_html(&form.min_stock),
        img,
        cost_price: escape_html(&form.cost_price),
        profit_margin: escape_html(&form.profit_margin),
    };

    let outcome = upsert_product(store, &product)?;
    debug!(id, ?outcome, "product saved");
    remove_image(&paths.uploads_dir(), &removed)?;

    let verb = match outcome {
        UpsertOutcome::Inserted => "added",
        UpsertOutcome::Updated => "updated",
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product {verb} ({}): {}",
        product.id, product.name
    )));
    Ok(result.with_affected_products(vec![product]))
}

fn remove_image(uploads: &Path, img: &str) -> Result<()> {
    if img.is_empty() {
        return Ok(());
    }
    match fs::remove_file(uploads.join(img)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(img, "image to remove was already gone");
            Ok(())
        }
        Err(e) => Err(StockError::Io(e)),
    }
}
