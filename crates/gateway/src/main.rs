//! CiteGraph API Gateway
//!
//! Serves one loaded citation graph at a time.
//! Handles:
//! - Graph upload and replacement
//! - Cycle, filter, neighbor and detail queries
//! - Rate limiting
//! - Observability (logging, metrics)

mod handlers;
mod middleware;
mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use citegraph_common::{config::AppConfig, metrics};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use middleware::rate_limit::{self, RateLimitState};
pub use state::{AppState, GraphSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration, from one explicit file when APP_CONFIG_FILE is set
    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::load()?,
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.observability.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        service = %config.observability.service_name,
        "Starting CiteGraph API Gateway v{}",
        citegraph_common::VERSION
    );

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets(metrics::ANALYSIS_BUCKETS)?
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    let config = Arc::new(config);
    let state = AppState {
        config: config.clone(),
        session: Arc::new(GraphSession::new()),
        limiter: rate_limit::from_config(&config.rate_limit)?,
    };

    if let Some(path) = &config.graph.initial_document {
        preload(&state, path).await;
    }

    // Build the router
    let app = create_router(state);

    let addr = config.bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Load the configured startup document. The server starts empty on failure.
async fn preload(state: &AppState, path: &std::path::Path) {
    let document = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Initial graph document unreadable");
            return;
        }
    };

    match state.session.load(document).await {
        Ok(snapshot) => info!(
            path = %path.display(),
            nodes = snapshot.stats.node_count,
            "Initial graph loaded"
        ),
        Err(e) => warn!(path = %path.display(), error = %e, "Initial graph rejected"),
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let body_limit = DefaultBodyLimit::max(state.config.graph.max_document_bytes);

    // API routes
    let mut api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Graph endpoints
        .route(
            "/graph",
            post(handlers::graph::load_graph)
                .layer(body_limit)
                .get(handlers::graph::get_graph),
        )
        .route("/graph/stats", get(handlers::graph::get_stats))
        .route("/graph/cycles", get(handlers::graph::get_cycles))
        .route("/graph/filter", post(handlers::graph::filter_graph))

        // Node endpoints
        .route("/nodes/{id}", get(handlers::nodes::get_node))
        .route("/nodes/{id}/neighbors", get(handlers::nodes::get_neighbors))
        .route("/nodes/{id}/details", get(handlers::nodes::get_node_details))
        .route_layer(from_fn(middleware::metrics::track_requests));

    if let Some(limiter) = state.limiter.clone() {
        let limit_state = RateLimitState {
            limiter,
            requests_per_second: state.config.rate_limit.requests_per_second,
        };
        api_routes = api_routes.layer(from_fn_with_state(
            limit_state,
            rate_limit::rate_limit_middleware,
        ));
    }

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
