pub mod api;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::services::{LeadNotifier, PriceProvider};

/// Lead relay configuration: either forward to an external webhook or
/// handle leads with the built-in reference backend.
pub struct LeadRelay {
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub allowed_origins: Vec<String>,
    pub notifier: LeadNotifier,
    pub client: reqwest::Client,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<PriceProvider>,
    pub relay: Arc<LeadRelay>,
    pub started_at: DateTime<Utc>,
}

impl FromRef<AppState> for Arc<PriceProvider> {
    fn from_ref(app_state: &AppState) -> Arc<PriceProvider> {
        app_state.provider.clone()
    }
}

impl FromRef<AppState> for Arc<LeadRelay> {
    fn from_ref(app_state: &AppState) -> Arc<LeadRelay> {
        app_state.relay.clone()
    }
}

/// Start the axum server
pub async fn serve(
    provider: Arc<PriceProvider>,
    relay: Arc<LeadRelay>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting goldcalc server");

    let cors = build_cors_layer(&relay.allowed_origins);

    let app_state = AppState {
        provider,
        relay,
        started_at: Utc::now(),
    };

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /price?refresh=true");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/lead");

    let app = Router::new()
        .route("/price", get(api::get_price_handler))
        .route("/health", get(api::health_handler))
        .route(
            "/api/lead",
            post(api::submit_lead_handler).fallback(api::method_not_allowed_handler),
        )
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS from the configured allow-list; an empty list means any origin
/// (the calculator page may be embedded anywhere).
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping unparseable allowed origin: {}", o);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
