//! HTTP server lifecycle.
//!
//! Binds the configured address, serves the application router, and shuts
//! down gracefully on Ctrl-C or SIGTERM.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::UserStore;

/// Build the store described by the configuration.
#[must_use]
pub fn build_store(config: &Config) -> UserStore {
    if config.store.seed {
        UserStore::seeded()
    } else {
        UserStore::new()
    }
}

/// Bind a listener on `addr`.
///
/// # Errors
///
/// Returns [`Error::Bind`] if the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })
}

/// Run the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn run(config: &Config) -> Result<()> {
    let listener = bind(config.socket_addr()?).await?;
    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<F>(listener: TcpListener, config: &Config, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let store = build_store(config);
    info!("Store initialized with {} users", store.len());

    let app = api::router(AppState::new(store), config.server.docs);

    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);
    if config.server.docs {
        info!("API documentation at http://{}/swagger", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_store_seeded() {
        let store = build_store(&Config::default());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_build_store_unseeded() {
        let mut config = Config::default();
        config.store.seed = false;
        assert!(build_store(&config).is_empty());
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_in_use_port_fails() {
        let first = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let addr = first.local_addr().unwrap();

        let err = bind(addr).await.unwrap_err();
        assert!(matches!(err, Error::Bind { .. }));
    }

    #[tokio::test]
    async fn test_serve_until_shutdown() {
        let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let result = serve(listener, &Config::default(), async {}).await;
        assert!(result.is_ok());
    }
}
