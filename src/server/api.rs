use axum::{
    body::Bytes,
    extract::{Json, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::constants::LEAD_SECRET_HEADER;
use crate::models::{Lead, MarketData};
use crate::server::AppState;

/// Query parameters for /price
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    /// Bypass the cache slot and fetch live
    #[serde(default)]
    pub refresh: bool,
}

/// GET /price - current snapshot, cache-aware
///
/// Always 200: a degraded quote is still a quote, visible only through
/// its provenance tag.
pub async fn get_price_handler(
    State(app_state): State<AppState>,
    Query(params): Query<PriceQuery>,
) -> Json<MarketData> {
    debug!(refresh = params.refresh, "Price request");
    let data = app_state.provider.fetch_price(params.refresh).await;

    info!(
        price = data.spot_price_cad,
        fallback = data.is_fallback(),
        "Returning price snapshot"
    );
    Json(data)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: i64,
    /// "forward" when a webhook is configured, "local" otherwise
    pub lead_backend: &'static str,
}

/// GET /health
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: (Utc::now() - app_state.started_at).num_seconds(),
        lead_backend: if app_state.relay.webhook_url.is_some() {
            "forward"
        } else {
            "local"
        },
    })
}

/// Fallback for non-POST requests on /api/lead
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// POST /api/lead - validate preconditions, then either forward the raw
/// body to the configured webhook (passing its status and body back
/// verbatim) or handle the lead with the built-in reference backend.
pub async fn submit_lead_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_json_content_type(headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid content type" })),
        )
            .into_response();
    }

    let origin = headers.get("origin").and_then(|v| v.to_str().ok());
    if !origin_allowed(&app_state.relay.allowed_origins, origin) {
        warn!(origin = origin.unwrap_or(""), "Lead rejected: origin not allowed");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Origin not allowed" })),
        )
            .into_response();
    }

    match &app_state.relay.webhook_url {
        Some(url) => forward_lead(&app_state, url, body).await,
        None => handle_lead_locally(&app_state, &body),
    }
}

/// Forward the body plus the shared-secret header; the backend's status
/// code and body come back to the caller untouched.
async fn forward_lead(app_state: &AppState, url: &str, body: Bytes) -> Response {
    let mut request = app_state
        .relay
        .client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(secret) = &app_state.relay.webhook_secret {
        request = request.header(LEAD_SECRET_HEADER, secret);
    }

    match request.send().await {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let backend_body = response.bytes().await.unwrap_or_default();
            info!(status = status.as_u16(), "Lead forwarded to webhook");
            (status, backend_body).into_response()
        }
        Err(e) => {
            error!("Lead forwarding failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": "error", "message": "Notification backend unreachable" })),
            )
                .into_response()
        }
    }
}

/// Reference backend path. Mirrors the external backend's envelope
/// contract: always 200 with `{"status": ...}`.
fn handle_lead_locally(app_state: &AppState, body: &Bytes) -> Response {
    let lead: Lead = match serde_json::from_slice(body) {
        Ok(lead) => lead,
        Err(e) => {
            warn!("Unparseable lead payload: {}", e);
            return Json(json!({ "status": "error", "message": e.to_string() })).into_response();
        }
    };

    match app_state.relay.notifier.handle(&lead) {
        Ok(()) => Json(json!({ "status": "success" })).into_response(),
        Err(e) => {
            error!("Lead handling failed: {}", e);
            Json(json!({ "status": "error", "message": e.to_string() })).into_response()
        }
    }
}

fn is_json_content_type(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.contains("application/json"))
}

/// Empty allow-list accepts everything; a request without an Origin
/// header (curl, server-to-server) is accepted either way.
fn origin_allowed(allowed: &[String], origin: Option<&str>) -> bool {
    match origin {
        Some(origin) if !allowed.is_empty() => allowed.iter().any(|a| a == origin),
        _ => true,
    }
}
