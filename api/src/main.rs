//! EmoGo backend: records vlogs, sentiments and GPS fixes in MongoDB and
//! serves uploaded videos.
//!
//! ## Environment Variables
//! - `PORT` - port to listen on (default: `8000`)
//! - `MONGODB_URI` - connection string (default: `mongodb://localhost:27017`)
//! - `MONGODB_DB` - database name (default: `emogo_data`)
//! - `MONGODB_TIMEOUT_SECS` - server selection timeout (default: `10`)
//! - `UPLOAD_DIR` - where uploaded videos are written (default: `uploads`)
//! - `MAX_UPLOAD_SIZE` - request body cap in bytes (default: 200 MB)
//! - `RUST_LOG` - tracing filter (default: `info`)

mod config;
mod constants;
mod domain;
mod models;
mod routes;
mod services;
mod storage;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Level, Span, info};
use tracing_subscriber::{EnvFilter, fmt};

use config::Config;
use services::db::{MongoStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// Assemble the router with its middleware stack.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<_>| {
            let method = req.method().clone();
            let uri = req.uri().path().to_string();
            tracing::span!(Level::INFO, "http", %method, %uri)
        })
        .on_response(|res: &Response<_>, latency: Duration, _span: &Span| {
            info!(
                status = %res.status(),
                elapsed_ms = latency.as_millis() as u64,
                "response"
            );
        });

    Router::new()
        .merge(routes::build_routes())
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    storage::ensure_upload_dir(&config.upload_dir).await?;
    info!("Upload directory: {:?}", config.upload_dir);

    let store = MongoStore::open(
        &config.mongodb_uri,
        &config.database_name,
        config.server_selection_timeout,
    )
    .await?;

    // The store is released whether serving ends cleanly or not
    let result = serve(&config, store.clone()).await;
    store.close().await;
    result
}

async fn serve(config: &Config, store: MongoStore) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        store: Arc::new(store),
        upload_dir: config.upload_dir.clone(),
        max_upload_bytes: config.max_upload_bytes,
    });

    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
