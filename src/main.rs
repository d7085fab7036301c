use std::sync::Arc;

use livros::config::{Config, StorageBackend};
use livros::db::SqliteBookStore;
use livros::middleware::auth::BasicCredentials;
use livros::router::{CatalogState, catalog_router};
use livros::service::{MemoryCatalog, SharedStore};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        storage = ?cfg.storage.backend,
        loglevel = %cfg.basic.loglevel,
        username = %cfg.basic.username
    );

    let store: SharedStore = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("in-memory catalog selected; records are lost on restart");
            Arc::new(MemoryCatalog::spawn().await?)
        }
        StorageBackend::Sqlite => {
            Arc::new(SqliteBookStore::connect(&cfg.storage.database_url).await?)
        }
    };

    let credentials = BasicCredentials::new(cfg.basic.username.clone(), cfg.basic.password.clone());
    let state = CatalogState::new(store, credentials);
    let app = catalog_router(state);

    let listener = TcpListener::bind(cfg.basic.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
