use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use jsonstore_store::InMemoryDocumentStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// JsonStore HTTP server.
///
/// Owns the document store for the lifetime of the process. When serving
/// stops, the store is closed so that late writers get `Unavailable`.
pub struct JsonStoreServer {
    config: ServerConfig,
    store: Arc<InMemoryDocumentStore>,
}

impl JsonStoreServer {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<InMemoryDocumentStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<InMemoryDocumentStore> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.store.clone()), &self.config)
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` completes, then drain in-flight requests and
    /// close the store.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("JsonStore server listening on {}", listener.local_addr()?);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()));

        self.store.close();
        tracing::info!("JsonStore server stopped");
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
