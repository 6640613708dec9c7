use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Extension, Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::search::handlers::handle_list;
use crate::storage::handlers::{handle_get_by_id, handle_health};
use crate::storage::memory::DocumentStore;
use crate::storage::protocol::{ENDPOINT_HEALTH, ENDPOINT_INSTITUTION, ENDPOINT_INSTITUTIONS};
use crate::storage::repository::InstitutionRepository;

/// Builds the read-only catalog API over `store`.
pub fn router<R: InstitutionRepository>(store: Arc<R>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(ENDPOINT_INSTITUTIONS, get(handle_list::<R>))
        .route(ENDPOINT_INSTITUTION, get(handle_get_by_id::<R>))
        .route(ENDPOINT_HEALTH, get(handle_health::<R>))
        .layer(Extension(store))
        .layer(cors)
}

pub async fn serve(config: &Config) -> Result<()> {
    info!("Opening collection at {}", config.data_path.display());
    let store = Arc::new(DocumentStore::open(&config.data_path).await?);

    let app = router(store);

    let listener = TcpListener::bind(config.bind).await?;
    info!("Escolha Certa API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
