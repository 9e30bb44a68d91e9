// SPDX-License-Identifier: MIT

//! Keyword-tracking routes, proxied to the analysis backend.
//!
//! Each proxied call carries a freshly minted five-minute token asserting
//! the caller's identity and plan snapshot.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::auth::mint_backend_token;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthSession;
use crate::models::User;
use crate::routes::{require_user, StatusResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/keywords", get(list_keywords).post(create_keyword))
        .route("/api/keywords/{keyword}/matches", get(keyword_matches))
        .route("/api/keywords/{keyword}/read", post(mark_read))
}

fn backend_token(state: &AppState, user: &User) -> Result<String> {
    mint_backend_token(user, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
}

/// List tracked keywords.
async fn list_keywords(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &session).await?;
    let token = backend_token(&state, &user)?;
    let keywords = state.backend.list_keywords(&user.id, &token).await?;
    Ok(Json(keywords))
}

/// Create a tracked keyword. The payload passes through untouched; the
/// backend owns its shape.
async fn create_keyword(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &session).await?;
    let token = backend_token(&state, &user)?;
    let created = state
        .backend
        .create_keyword(&user.id, &token, &payload)
        .await?;
    Ok(Json(created))
}

/// Fetch match threads for a keyword.
async fn keyword_matches(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Path(keyword): Path<String>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &session).await?;
    let token = backend_token(&state, &user)?;
    let matches = state
        .backend
        .keyword_matches(&user.id, &token, &keyword)
        .await?;
    Ok(Json(matches))
}

/// Mark a keyword's matches as read.
async fn mark_read(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Path(keyword): Path<String>,
) -> Result<Json<StatusResponse>> {
    let user = require_user(&state, &session).await?;
    let token = backend_token(&state, &user)?;
    state
        .backend
        .mark_keyword_read(&user.id, &token, &keyword)
        .await?;
    Ok(Json(StatusResponse::success()))
}
