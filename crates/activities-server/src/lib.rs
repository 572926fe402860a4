pub mod error;
pub mod routes;
pub mod state;

use activities_core::Directory;
use axum::routing::{get, post};
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Listener and asset settings resolved by the CLI.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory mounted at `/static`. Skipped when absent on disk.
    pub static_dir: Option<PathBuf>,
}

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(directory: Arc<Directory>, static_dir: Option<&Path>) -> Router {
    let app_state = state::AppState::new(directory);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(routes::root::index))
        .route("/activities", get(routes::activities::list_activities))
        .route("/activities/{name}", get(routes::activities::get_activity))
        .route(
            "/activities/{name}/signup",
            post(routes::activities::sign_up),
        )
        .route(
            "/activities/{name}/unregister",
            post(routes::activities::unregister),
        );

    match static_dir {
        Some(dir) if dir.is_dir() => {
            router = router.nest_service("/static", ServeDir::new(dir));
        }
        Some(dir) => {
            tracing::warn!(
                "static directory {} not found, /static will not be served",
                dir.display()
            );
        }
        None => {}
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Bind `config.host:config.port` and serve until the process exits.
pub async fn serve(config: ServerConfig, directory: Arc<Directory>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(config, listener, directory).await
}

/// Serve on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    config: ServerConfig,
    listener: tokio::net::TcpListener,
    directory: Arc<Directory>,
) -> anyhow::Result<()> {
    let local = listener.local_addr()?;
    let activities = directory.len();
    let app = build_router(directory, config.static_dir.as_deref());

    tracing::info!("activities server listening on http://{local} ({activities} activities)");

    axum::serve(listener, app).await?;
    Ok(())
}
