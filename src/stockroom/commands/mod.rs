use crate::config::StockroomConfig;
use crate::import::ImportSummary;
use crate::model::{Category, Product};
use std::path::{Path, PathBuf};

pub mod categories;
pub mod config;
pub mod delete;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod save;
pub mod search;
pub mod stock;

const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct StockPaths {
    pub data: PathBuf,
}

impl StockPaths {
    pub fn new(data: impl Into<PathBuf>) -> Self {
        Self { data: data.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    /// Where uploaded images and CSV files are kept.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data.join(UPLOADS_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_products: Vec<Product>,
    pub listed_products: Vec<Product>,
    pub categories: Vec<Category>,
    pub category_names: Vec<String>,
    pub summary: Option<ImportSummary>,
    pub config: Option<StockroomConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_products(mut self, products: Vec<Product>) -> Self {
        self.affected_products = products;
        self
    }

    pub fn with_listed_products(mut self, products: Vec<Product>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_category_names(mut self, names: Vec<String>) -> Self {
        self.category_names = names;
        self
    }

    pub fn with_summary(mut self, summary: ImportSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: StockroomConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
