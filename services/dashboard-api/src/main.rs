//! Dashboard API server.
//!
//! Serves the precipitation dashboard and its JSON API from an immutable
//! snapshot of the day store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dashboard_api::handlers;
use dashboard_api::state::AppState;

/// Dashboard API Server
#[derive(Parser, Debug)]
#[command(name = "dashboard-api")]
#[command(about = "Web dashboard for daily precipitation at Czech stations")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8090", env = "DASHBOARD_LISTEN_ADDR")]
    listen: String,

    /// Directory holding the per-date CSV files
    #[arg(long, env = "DATA_DIR", default_value = "data/daily")]
    data_dir: PathBuf,

    /// Station metadata CSV
    #[arg(long, env = "STATIONS_FILE", default_value = "data/stations.csv")]
    stations_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "DASHBOARD_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    info!("Starting dashboard API server");

    // Install the Prometheus recorder before any counters are touched
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    let state = match AppState::load(&args.data_dir, &args.stations_file, metrics_handle) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        // Dashboard page
        .route("/", get(handlers::dashboard::dashboard_handler))
        // Data API
        .route("/api/stations", get(handlers::stations::stations_handler))
        .route("/api/range", get(handlers::stations::range_handler))
        .route("/api/daily", get(handlers::daily::daily_handler))
        .route("/api/summary", get(handlers::summary::summary_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("Dashboard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
