use clap::Parser;
use directories::ProjectDirs;
use stockroom::api::{ConfigAction, InventoryApi, ListFilter, Sale, StockPaths};
use stockroom::config::StockroomConfig;
use stockroom::error::{Result, StockError};
use stockroom::import::ImportOptions;
use stockroom::server::{self, AppState};
use stockroom::store::fs_backend::FsBackend;
use stockroom::store::Catalog;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod print;
use args::{Cli, Commands};
use print::*;

/// Overrides the data directory when `--data-dir` is not given.
const DATA_DIR_ENV: &str = "STOCKROOM_DATA";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: InventoryApi<Catalog<FsBackend>>,
    config: StockroomConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Serve { bind }) => handle_serve(ctx, bind),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Preview { file }) => handle_preview(&ctx, &file),
        Some(Commands::List { low, expired }) => handle_list(&ctx, low, expired),
        Some(Commands::Get { id }) => handle_get(&ctx, id),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Sku { code }) => handle_sku(&ctx, &code),
        Some(Commands::Search { term }) => handle_search(&ctx, &term),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Sell { items }) => handle_sell(&mut ctx, &items),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, false, false),
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "stockroom", "stockroom")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StockError::Api("Could not determine a data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = StockroomConfig::load(&data_dir)?;

    let store = Catalog::with_backend(FsBackend::new(&data_dir));
    let api = InventoryApi::new(store, StockPaths::new(&data_dir)).with_import_options(
        ImportOptions {
            fallback_category: config.fallback_category.clone(),
        },
    );

    Ok(AppContext { api, config })
}

fn handle_serve(ctx: AppContext, bind: Option<String>) -> Result<()> {
    let addr = bind.unwrap_or_else(|| ctx.config.bind.clone());
    std::fs::create_dir_all(ctx.api.paths().uploads_dir())?;
    let state = AppState::new(ctx.api, ctx.config.max_upload_bytes);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(state, &addr))
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let result = ctx.api.import_file(file)?;
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_preview(ctx: &AppContext, file: &Path) -> Result<()> {
    let result = ctx.api.preview_file(file)?;
    print_names(&result.category_names);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, low: bool, expired: bool) -> Result<()> {
    let filter = match (low, expired) {
        (true, _) => ListFilter::LowStock,
        (_, true) => ListFilter::Expired,
        _ => ListFilter::All,
    };
    let result = ctx.api.list_products(filter)?;
    print_products(&result.listed_products);
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.get_product(id)?;
    for product in &result.listed_products {
        print_product(product);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: i64) -> Result<()> {
    let result = ctx.api.delete_product(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sku(ctx: &AppContext, code: &str) -> Result<()> {
    let result = ctx.api.find_by_sku(code)?;
    match result.listed_products.first() {
        Some(product) => print_product(product),
        None => println!("No product with barcode {code}."),
    }
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search_by_name(term)?;
    print_products(&result.listed_products);
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_categories()?;
    print_categories(&result.categories);
    Ok(())
}

fn handle_sell(ctx: &mut AppContext, items: &[String]) -> Result<()> {
    let sales = items
        .iter()
        .map(|item| parse_sale(item))
        .collect::<Result<Vec<_>>>()?;
    let result = ctx.api.decrement_inventory(&sales)?;
    print_messages(&result.messages);
    Ok(())
}

/// `ID` or `ID:QUANTITY`.
fn parse_sale(item: &str) -> Result<Sale> {
    let invalid = || StockError::Api(format!("Invalid sale {item:?}, expected ID or ID:QUANTITY"));
    let (id, quantity) = match item.split_once(':') {
        Some((id, qty)) => (id, qty.trim().parse::<i64>().map_err(|_| invalid())?),
        None => (item, 1),
    };
    let id = id.trim().parse().map_err(|_| invalid())?;
    if quantity < 1 {
        return Err(invalid());
    }
    Ok(Sale { id, quantity })
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
