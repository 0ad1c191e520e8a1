//! Documentation of the interest matcher backend.
//!
//! Users register a name and a list of interests, and get shown which other
//! registered users share the most interests with them.
//!
//!
//!
//! # General Infrastructure
//! - Single axum server, no proxy in front needed for local use
//! - `GET /` renders the whole page: form, user list, recommendations
//! - `POST /` registers a user, answers JSON for scripted posts and the page otherwise
//! - `/submit` is a leftover form target and always answers 404
//! - `/pkg` serves the wasm build of the form handler the page loads
//! - Users live in one CSV file next to the binary, see [`roster::store`]
//!
//!
//!
//! # Notes
//!
//! ## Recomputing on every request
//! Recommendations are rebuilt from the CSV file on every request instead of being
//! cached. The roster is small (all pairs for a few hundred users is nothing) and it
//! keeps the file as the only source of truth, so editing it by hand just works.
//!
//! ## Duplicate names
//! The store lock is held from the duplicate check to the append. Without it two quick
//! submissions of the same name could both pass the check.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run the server, logs controlled through `RUST_LOG`.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! ## Environment
//! - `RUST_PORT`: port to bind, default `5000`
//! - `DATA_FILE`: CSV roster path, default `user_interests.csv`
//! - `STATIC_DIR`: compiled browser client served under `/pkg`, default `frontend/pkg`
use std::{future::pending, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, Method, header::CONTENT_TYPE},
    routing::{any, get},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{index_handler, misrouted_handler, submit_handler};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-requested-with")])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/submit", any(misrouted_handler))
        .nest_service("/pkg", ServeDir::new(&state.config.static_dir))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().expect("Data file misconfigured!");

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shutting down...");
}

/// Resolves on Ctrl-C or SIGTERM, whichever comes first.
///
/// A listener that cannot be installed is logged and never fires, the other one still can.
async fn shutdown_signal() {
    let received = tokio::select! {
        name = interrupt() => name,
        name = terminate() => name,
    };

    info!("Received {received}, shutting down");
}

async fn interrupt() -> &'static str {
    if let Err(e) = signal::ctrl_c().await {
        error!("Ctrl-C listener unavailable: {e}");
        pending::<()>().await;
    }

    "Ctrl-C"
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    use signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!("SIGTERM listener unavailable: {e}");
            pending::<()>().await;
        }
    }

    "SIGTERM"
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    pending().await
}
