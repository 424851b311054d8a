use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};
use service::auth::{repo::seaorm::SeaOrmAuthRepository, AuthConfig, AuthService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
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

/// Public entry: acquire the pool, serve until a shutdown signal, then release the pool.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // DB connection
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    // Credential service over the Postgres store
    let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
    let svc = AuthService::new(repo, AuthConfig { hash_cost: cfg.auth.hash_cost })?;
    let state = auth::ServerState::new(svc);

    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, hash_cost = cfg.auth.hash_cost, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("http server stopped; closing database pool");
    db.close().await?;
    Ok(())
}
