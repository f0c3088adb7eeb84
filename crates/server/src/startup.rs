use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::{ServerAuthConfig, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect storage for the configured backend. PostgreSQL is migrated to
/// the latest schema before any request is served.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let auth = ServerAuthConfig { jwt_secret: cfg.auth.jwt_secret.clone() };
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            info!("database migrated");
            Ok(ServerState::with_database(db, auth))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; listings are lost on restart");
            Ok(ServerState::in_memory(auth))
        }
    }
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve on an already-bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    let addr = listener.local_addr()?;
    info!(%addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}

/// Public entry: build state and the router, bind, serve.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr = cfg.server.bind_addr();
    let state = build_state(&cfg).await?;
    let app = build_app(state);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {addr}: {e}")))?;
    serve(listener, app).await
}
