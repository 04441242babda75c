use colored::*;
use stockroom::api::{CmdMessage, MessageLevel};
use stockroom::config::{StockroomConfig, KEYS};
use stockroom::import::ImportSummary;
use stockroom::model::{Category, Product, StockStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 12;
const QTY_WIDTH: usize = 7;
const PRICE_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 8;
const CATEGORY_WIDTH: usize = 18;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        println!("{}", product_line(product));
    }
}

pub fn print_product(product: &Product) {
    println!("{} {}", product.id.to_string().yellow(), product.name.bold());
    println!("--------------------------------");
    let rows = [
        ("barcode", product.barcode.to_string()),
        ("category", product.category.clone()),
        ("price", product.price.clone()),
        ("cost price", product.cost_price.clone()),
        ("profit margin", product.profit_margin.clone()),
        ("quantity", product.quantity.to_string()),
        ("min stock", product.min_stock.clone()),
        ("status", status_label(product.stock_status()).to_string()),
        ("expires", product.expiration_date.clone()),
        ("image", product.img.clone()),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("{:<14} {}", label.dimmed(), value);
        }
    }
}

pub fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!("{:>10}  {}", category.id.to_string().dimmed(), category.name);
    }
}

pub fn print_names(names: &[String]) {
    for name in names {
        println!("  {name}");
    }
}

pub fn print_summary(summary: &ImportSummary) {
    println!(
        "{} inserted, {} updated, {} rejected",
        summary.inserted.to_string().green(),
        summary.updated.to_string().cyan(),
        if summary.rejected.is_empty() {
            "0".normal()
        } else {
            summary.rejected.len().to_string().red()
        }
    );
}

pub fn print_config(config: &StockroomConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{key} = {value}");
        }
    }
}

/// One table row: id, name, category, quantity, price, status.
fn product_line(product: &Product) -> String {
    let fixed = ID_WIDTH + CATEGORY_WIDTH + QTY_WIDTH + PRICE_WIDTH + STATUS_WIDTH + 5;
    let name_width = LINE_WIDTH.saturating_sub(fixed);

    let name = truncate_to_width(&product.name, name_width);
    let name_padding = name_width.saturating_sub(name.width());
    let category = truncate_to_width(&product.category, CATEGORY_WIDTH);
    let category_padding = CATEGORY_WIDTH.saturating_sub(category.width());

    let status = status_label(product.stock_status());
    let status_colored = match product.stock_status() {
        StockStatus::Out => status.red(),
        StockStatus::Low => status.yellow(),
        StockStatus::Normal => status.normal(),
    };

    format!(
        "{:>id_w$} {}{} {}{} {:>qty_w$} {:>price_w$} {:>status_w$}",
        product.id.to_string().dimmed(),
        name,
        " ".repeat(name_padding),
        category,
        " ".repeat(category_padding),
        product.quantity,
        product.price,
        status_colored,
        id_w = ID_WIDTH,
        qty_w = QTY_WIDTH,
        price_w = PRICE_WIDTH,
        status_w = STATUS_WIDTH,
    )
}

fn status_label(status: StockStatus) -> &'static str {
    match status {
        StockStatus::Out => "out",
        StockStatus::Low => "low",
        StockStatus::Normal => "ok",
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
