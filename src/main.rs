//! Server binary: config load, tracing init, router wiring, serve.

use axum::http::{HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use technotype::adapters::http::{routes, AppState};
use technotype::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    // Credential diagnostics: presence, length and prefix only.
    if config.ai.has_api_key() {
        tracing::info!(
            key_length = config.ai.key_length(),
            key_prefix = %config.ai.key_prefix(),
            "OPENAI_API_KEY loaded"
        );
    } else {
        tracing::warn!("OPENAI_API_KEY not set; generation routes will answer 500");
    }

    let state = AppState::from_config(&config);

    let cors = build_cors(&config.server.cors_origins_list());
    let app = routes()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(port = config.server.port, "Server running");
    tracing::info!(
        "Health check available at: http://localhost:{}/api/health",
        config.server.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Permissive CORS by default; restricted to the configured origins when
/// any are set.
fn build_cors(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
