//! Webhook HTTP surface.
//!
//! Stateless request/response: each POST is formatted and handed to the
//! delivery collaborator, and the caller gets a 202 before the send
//! completes. Delivery failures are logged, never surfaced synchronously.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::{Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::format;
use crate::model::NewsItem;
use crate::notify::Delivery;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub delivery: Arc<dyn Delivery>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/webhook/{name}", post(webhook))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WebhookRequest {
    title: Option<String>,
    text: Option<String>,
    items: Option<Vec<NewsItem>>,
    summary: Option<String>,
    timestamp: Option<String>,
}

/// Preformatted `text` wins; otherwise a non-empty `items` array is rendered
/// into the grouped digest layout. Neither present is the one client-facing
/// validation failure.
fn build_message(req: &WebhookRequest) -> Option<String> {
    if let Some(text) = req.text.as_deref().filter(|t| !t.is_empty()) {
        return Some(format::compose(req.title.as_deref(), text));
    }

    let items = req.items.as_deref().filter(|i| !i.is_empty())?;
    let body = format::format_items(items, req.summary.as_deref(), req.timestamp.as_deref());
    Some(format::compose(req.title.as_deref(), &body))
}

async fn webhook(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<WebhookRequest>,
) -> (StatusCode, Json<Value>) {
    let item_count = req.items.as_ref().map(|i| i.len()).unwrap_or(0);
    info!(endpoint = %name, items = item_count, "webhook request received");

    let Some(message) = build_message(&req) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing text or items field" })),
        );
    };

    // Fire-and-forget: the caller is acknowledged before delivery finishes.
    let delivery = state.delivery.clone();
    tokio::spawn(async move {
        if let Err(e) = delivery.send(&message).await {
            error!(error = %e, "delivery failed after 202 was returned");
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(json!({ "success": true, "message": "Message queued for delivery" })),
    )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "path": uri.path() })),
    )
}
