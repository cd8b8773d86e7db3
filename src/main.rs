use std::sync::Arc;

use tracing::info;

use corkboard::web::handlers::AppState;
use corkboard::{Config, Database, FileStorage, SqliteSessionStore, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = corkboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        corkboard::logging::init_console_only(&config.logging.level);
    }

    info!("corkboard - discussion board backend");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let storage = match FileStorage::new(&config.files.upload_dir) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Failed to initialize upload storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Upload storage at {}", config.files.upload_dir);

    let sessions = Arc::new(SqliteSessionStore::new(db.pool().clone()));
    let state = Arc::new(AppState::new(db, sessions, storage, &config));

    let server = match WebServer::new(&config.server, state) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to configure server: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
