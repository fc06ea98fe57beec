use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

pub mod auth;
pub mod views;
pub mod apps;
pub mod settings;
pub mod extract;

use auth::ServerState;

pub async fn home() -> &'static str {
    "NhoyHub API is Running!"
}

pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    let database = if state.site.store_available() { "connected" } else { "disconnected" };
    Json(Health { status: "ok", database })
}

/// Build the full application router: public counter/catalog reads and the
/// password-guarded admin writes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/visit", post(views::visit))
        .route("/api/stats", get(views::stats))
        .route("/api/apps", get(apps::list));

    let admin = Router::new()
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/reset-views", post(views::reset_views))
        .route("/api/admin/update-views", post(views::update_views))
        .route(
            "/api/admin/setting/locker",
            get(settings::get_locker).post(settings::set_locker),
        )
        .route("/api/admin/add-app", post(apps::add))
        .route("/api/admin/edit-app", post(apps::edit))
        .route("/api/admin/delete-app", post(apps::delete));

    public
        .merge(admin)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
