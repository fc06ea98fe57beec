use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes::{self, auth::ServerState};
use service::{
    auth::AdminGuard,
    site::{repository::SeaOrmSiteRepository, service::SiteService},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect and migrate the configured store. Any failure leaves the service
/// running without one.
pub async fn open_store(cfg: &DatabaseConfig) -> Option<SeaOrmSiteRepository> {
    if !cfg.is_configured() {
        warn!("no database url configured; serving defaults only");
        return None;
    }
    if let Err(e) = common::env::ensure_data_dir(&cfg.url).await {
        error!(error = %e, "cannot prepare data directory");
        return None;
    }
    match models::db::connect_and_migrate(cfg).await {
        Ok(db) => Some(SeaOrmSiteRepository { db }),
        Err(e) => {
            error!(error = %e, "database connection failed; serving defaults only");
            None
        }
    }
}

pub async fn build_state(cfg: &AppConfig) -> ServerState {
    let guard = AdminGuard::new(cfg.admin.password.clone());
    if !guard.is_configured() {
        warn!("ADMIN_PASSWORD not set; admin endpoints will reject every request");
    }
    let repo = open_store(&cfg.database).await.map(Arc::new);
    ServerState { site: Arc::new(SiteService::new(repo, guard)) }
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;
    let state = build_state(&cfg).await;
    let app = build_app(state);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
