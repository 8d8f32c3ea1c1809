//! Documentation of the proposal response recorder.
//!
//!
//!
//! # Endpoints
//! - `POST /yes`: records a YES with a server-side timestamp, body `{ "message"?: string }`
//! - `GET /responses`: every recorded YES in creation order, no paging or auth
//! - `GET /health`: liveness probe with uptime and record count
//! - `GET /`: static description of the above
//!
//!
//!
//! # Storage
//! - In-memory log is the source of truth while the process lives
//! - Every YES rewrites `DATA_FILE` in full, see [`store`]
//! - On startup the log is rehydrated from `DATA_FILE`; a broken file is logged and ignored
//! - On SIGINT/SIGTERM the log is flushed once more before exiting
//!
//!
//!
//! # Notes
//!
//! ## CORS
//! Any origin is allowed. Nothing stored here is sensitive and the frontend
//! is usually hosted somewhere else.
//!
//! ## Volume
//! Rewriting the whole file per YES is fine for a handful of records. A deployment
//! expecting real traffic wants an append-only or batched layout instead.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! PORT=3000 DATA_FILE=responses.json RUST_LOG=info
//! ```
//!
//! Run.
//! ```sh
//! cargo run -p backend
//! ```
//!
//! Run with per-request client logs.
//! ```sh
//! cargo run -p backend --features server/verbose
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! `````
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod recorder;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

use routes::{health_handler, index_handler, responses_handler, yes_handler};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("💕 Proposal backend running on {address}");
    info!("   Health check: http://localhost:{}/health", state.config.port);
    info!(
        "   Loaded {} previous response(s)",
        state.recorder.lock().await.len()
    );

    serve(state, listener, shutdown_signal()).await?;

    info!("Server shut down");

    Ok(())
}

/// Serves until `shutdown` resolves, then writes the log out once more.
pub async fn serve(
    state: Arc<State>,
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state.clone());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    info!("Saving data before exit...");
    state.recorder.lock().await.flush();

    Ok(())
}

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/yes", post(yes_handler))
        .route("/responses", get(responses_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
