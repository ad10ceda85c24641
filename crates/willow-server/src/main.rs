//! Willow — cookie consent service.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod seed;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("WILLOW_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--seed" | "seed" => {
                let data_dir = if args.len() > 2 {
                    PathBuf::from(&args[2])
                } else {
                    resolve_data_dir()
                };
                let report = seed::run_seed(&data_dir);
                seed::print_report(&report);
                std::process::exit(if report.errors.is_empty() { 0 } else { 1 });
            }
            "--help" | "-h" | "help" => {
                println!("Willow — cookie consent service");
                println!();
                println!("Usage: willow [command]");
                println!();
                println!("Commands:");
                println!("  (none)             Start the server");
                println!("  seed [data-dir]    Seed a default category catalog");
                println!("  help               Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'willow help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    // Initialize configuration
    let config = willow_core::WillowConfig::from_env(&data_dir)?;
    let port = config.port;

    // Initialize catalog store
    let catalog = willow_catalog::CatalogStore::open(&config.data_paths.catalog)
        .map_err(|e| anyhow::anyhow!("Failed to open catalog: {}", e))?;

    // Build application state
    let state = Arc::new(AppState::new(config, catalog));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Willow server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
