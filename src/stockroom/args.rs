use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds.
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{VERSION}@{GIT_HASH} {GIT_COMMIT_DATE}")
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "stockroom", version = version())]
#[command(about = "Inventory catalog with bulk CSV import", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $STOCKROOM_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides the `bind` config key)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Import products from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Show the categories a CSV file would bring in, without importing
    Preview {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List products
    #[command(alias = "ls")]
    List {
        /// Only products at or below their minimum stock
        #[arg(long, conflicts_with = "expired")]
        low: bool,

        /// Only expired products
        #[arg(long)]
        expired: bool,
    },

    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: i64,
    },

    /// Find a product by barcode
    Sku {
        /// Barcode
        code: String,
    },

    /// Search products by name
    Search {
        /// Text contained in the name (case-insensitive)
        term: String,
    },

    /// List categories
    Categories,

    /// Record sold units and decrement stock
    Sell {
        /// Items as ID or ID:QUANTITY (quantity defaults to 1)
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Config key (bind, max-upload-bytes, fallback-category)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Create the data directory
    Init,
}
