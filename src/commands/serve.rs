use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], app.config.port));

    info!("listening on {addr}");

    let app = router(app);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub fn router(app: App) -> Router {
    Router::new()
        .route("/api/paste", post(handlers::paste::create))
        .route(
            "/api/paste/:id",
            get(handlers::paste::get_meta).post(handlers::paste::unlock),
        )
        .route("/api/files/upload", post(handlers::file::upload))
        .route("/api/files/serve/:id", get(handlers::file::serve))
        .route("/api/files/:id", get(handlers::file::get_meta))
        .route("/api/settings", get(handlers::settings::get_public))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/admin/pastes", get(handlers::admin::list_pastes))
        .route("/api/admin/pastes/:id", delete(handlers::admin::delete_paste))
        .route("/api/admin/files", get(handlers::admin::list_files))
        .route(
            "/api/admin/files/:id",
            patch(handlers::admin::toggle_file).delete(handlers::admin::delete_file),
        )
        .route(
            "/api/admin/settings",
            get(handlers::settings::get_admin).put(handlers::settings::update),
        )
        .route("/api/admin/password", post(handlers::settings::change_password))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(app.config.limits.max_upload_size))
        .layer(TraceLayer::new_for_http())
        .route_layer(NormalizePathLayer::trim_trailing_slash())
        .with_state(app)
}
