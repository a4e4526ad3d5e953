//! Process bootstrap: wire the layers together and serve until shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use shared::{db, CalendarService, Config, PgEventRepository, Result};

use crate::handlers::AppState;
use crate::routes::create_router;

/// Connect to the database, build repository, service and router in that
/// order, and serve on `config.listen_addr()`.
///
/// Returns when the listener fails or after a graceful shutdown triggered by
/// `SIGINT`/`SIGTERM`. The pool is closed on the way out either way.
pub async fn run(config: Config) -> Result<()> {
    let pool = db::create_pool(&config).await?;
    info!(
        max_connections = config.db_max_connections,
        "database pool ready"
    );

    let repository = Arc::new(PgEventRepository::new(pool.clone()));
    let service = CalendarService::new(repository);
    let app = create_router(AppState::new(service));

    let addr = config.listen_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            pool.close().await;
            return Err(e.into());
        }
    };
    info!(address = %addr, "Server started");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;

    match served {
        Ok(()) => {
            info!("Server stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "error running server");
            Err(e.into())
        }
    }
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM signal, shutting down gracefully"),
    }
}
