// SPDX-License-Identifier: MIT

//! Saved opportunity routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthSession;
use crate::models::SavedItem;
use crate::policy;
use crate::routes::{require_user, StatusResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/saved", get(list_saved).post(save_item))
        .route("/api/saved/{opportunity_id}", delete(unsave_item))
}

/// List saved items, most recently saved first.
async fn list_saved(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<SavedItem>>> {
    let user = require_user(&state, &session).await?;
    let items = state.store.get_saved_items(&user.id).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct SaveItemRequest {
    pub opportunity_id: Option<i64>,
    pub data: Option<serde_json::Value>,
}

/// Save an opportunity snapshot. Re-saving replaces the snapshot.
async fn save_item(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Json(req): Json<SaveItemRequest>,
) -> Result<Json<StatusResponse>> {
    let user = require_user(&state, &session).await?;

    let (Some(opportunity_id), Some(data)) = (req.opportunity_id, req.data) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    // Replacing an existing snapshot never consumes quota.
    if !state
        .store
        .saved_item_exists(&user.id, opportunity_id)
        .await?
    {
        let count = state.store.count_saved_items(&user.id).await?;
        policy::check_saved_quota(user.plan_type, count)?;
    }

    state.store.save_item(&user.id, opportunity_id, &data).await?;

    Ok(Json(StatusResponse::success()))
}

/// Remove a saved item. Removing an absent item succeeds.
async fn unsave_item(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Path(opportunity_id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    let user = require_user(&state, &session).await?;
    state.store.unsave_item(&user.id, opportunity_id).await?;
    Ok(Json(StatusResponse::success()))
}
