use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use shopcart::application::shop::Shop;
use shopcart::domain::ports::Stores;
use shopcart::infrastructure::credentials::Argon2Hasher;
use shopcart::interfaces::csv::item_reader::ItemReader;
use shopcart::interfaces::csv::item_writer::ItemWriter;
use shopcart::interfaces::http;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = "SHOPCART_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "SHOPCART_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(long, env = "SHOPCART_BIND", default_value = "127.0.0.1:8080")]
        bind: String,

        /// Items CSV file to load before serving
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Load items from a CSV file and print the resulting catalog
    ImportCatalog {
        /// Input items CSV file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _env = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let stores = open_stores(cli.db_path.as_deref())?;
    let shop = Shop::new(stores, Arc::new(Argon2Hasher::new()));

    match cli.command {
        Command::Serve { bind, catalog } => {
            if let Some(path) = catalog {
                import_catalog(&shop, &path).await?;
            }
            serve(shop, &bind).await
        }
        Command::ImportCatalog { input } => {
            import_catalog(&shop, &input).await?;

            let items = shop.catalog.list().await?;
            let stdout = io::stdout();
            let mut writer = ItemWriter::new(stdout.lock());
            writer.write_items(items)?;
            Ok(())
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<&Path>) -> Result<Stores> {
    use shopcart::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Opening RocksDB storage");
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(store.into_stores())
        }
        None => Ok(Stores::in_memory()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<&Path>) -> Result<Stores> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Stores::in_memory())
}

/// Imports every readable row of `path`. Bad rows are logged and skipped.
async fn import_catalog(shop: &Shop, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let reader = ItemReader::new(file);

    let mut items = Vec::new();
    for item in reader.items() {
        match item {
            Ok(item) => items.push(item),
            Err(e) => tracing::error!("Error reading item: {e}"),
        }
    }

    let imported = shop.catalog.import(items).await?;
    tracing::info!(imported, path = %path.display(), "Catalog imported");
    Ok(())
}

async fn serve(shop: Shop, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await.into_diagnostic()?;
    tracing::info!("Listening on {}", listener.local_addr().into_diagnostic()?);

    axum::serve(listener, http::router(Arc::new(shop)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
