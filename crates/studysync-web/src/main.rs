use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod handlers;
mod questions;
mod state;
mod template;
mod upload;

use state::AppState;
use studysync_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::Settings::resolve(config::load_config());
    tracing::info!(
        db = %settings.database_path.display(),
        uploads = %settings.uploads_dir.display(),
        subject = %settings.options.subject,
        "starting"
    );

    std::fs::create_dir_all(&settings.uploads_dir)?;
    let store = Store::open(&settings.database_path)?;

    // Stale login sessions from previous runs
    store.purge_sessions_older_than(config::SESSION_MAX_AGE_SECS)?;

    let state = Arc::new(AppState {
        store: Mutex::new(store),
        uploads_dir: settings.uploads_dir.clone(),
        options: settings.options.clone(),
    });

    // Syllabus uploads are small documents; cap the body well below that
    let body_limit = axum::extract::DefaultBodyLimit::max(25 * 1024 * 1024);

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::pages::index))
        .route("/register", axum::routing::get(handlers::auth::register_page))
        .route("/register", axum::routing::post(handlers::auth::register))
        .route("/login", axum::routing::get(handlers::auth::login_page))
        .route("/login", axum::routing::post(handlers::auth::login))
        .route("/logout", axum::routing::post(handlers::auth::logout))
        .route("/upload", axum::routing::post(handlers::guides::upload))
        .route("/guides/{id}", axum::routing::get(handlers::guides::view_guide))
        .route(
            "/guides/{id}/topics",
            axum::routing::post(handlers::guides::update_selection),
        )
        .route(
            "/guides/{id}/questions",
            axum::routing::get(handlers::guides::questions),
        )
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
