//! Voter API Server
//!
//! REST service exposing voters and their poll history. Records live in a
//! document store: RedisJSON in deployments, an in-memory map otherwise.

mod config;
mod extractors;
mod handlers;
mod services;
mod storage;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use voter_core::DocumentStore;

use config::{Backend, Config};
use handlers::{health::track_requests, polls, voters};
use services::{RequestMetrics, VoterStore};
use storage::{MemoryStore, RedisStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<VoterStore>,
    pub metrics: Arc<RequestMetrics>,
}

impl AppState {
    pub fn new(store: VoterStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: Arc::new(RequestMetrics::new()),
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    if let Err(e) = init_tracing(config.log_json) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Voter API Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        "Config loaded: bind={}, backend={:?}, store_timeout={:?}",
        config.bind_address(),
        config.backend,
        config.store_timeout()
    );

    let backend: Arc<dyn DocumentStore> = match config.backend {
        Backend::Memory => {
            info!("Using in-memory voter store");
            Arc::new(MemoryStore::new())
        }
        Backend::Redis => {
            info!("Using Redis voter store at {}", config.redis_url);
            Arc::new(RedisStore::new(&config.redis_url).context("Invalid Redis location")?)
        }
    };

    let store = VoterStore::new(backend, config.store_timeout());
    if let Err(e) = store.ping().await {
        warn!("Store not reachable yet, continuing: {}", e);
    }

    if config.seed {
        let seeded = store
            .seed_sample_voters()
            .await
            .context("Failed to seed sample voters")?;
        info!("Startup seed inserted {} voters", seeded);
    }

    let app = build_router(AppState::new(store));

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/voters", get(voters::list).delete(voters::delete_all))
        .route("/voters/health", get(handlers::health))
        .route("/voters/add-sample-voters", post(voters::seed))
        .route(
            "/voters/:id",
            get(voters::get).post(voters::create).delete(voters::delete),
        )
        .route("/voters/:id/polls", get(polls::list))
        .route(
            "/voters/:id/polls/:poll_id",
            get(polls::get).post(polls::create).delete(polls::delete),
        )
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await
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
