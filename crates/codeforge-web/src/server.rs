// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP API and embedded UI.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use axum::Router;
use codeforge::Forge;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub forge: Arc<Forge>,
}

pub fn create_router(forge: Arc<Forge>) -> Router {
    let state = AppState { forge };

    Router::new()
        .route("/", get(index))
        .route("/api/forge", post(forge_code))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

#[derive(Debug, Deserialize)]
pub struct ForgeRequest {
    pub code: String,
}

async fn forge_code(
    State(state): State<AppState>,
    Json(request): Json<ForgeRequest>,
) -> Result<Json<codeforge::Report>, (StatusCode, Json<Value>)> {
    if request.code.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "Please input some code to analyze!" })),
        ));
    }

    tracing::info!(bytes = request.code.len(), "forge request received");
    let report = state.forge.process(&request.code).await;
    Ok(Json(report))
}
