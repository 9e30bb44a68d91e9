// SPDX-License-Identifier: MIT

//! Board collection routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthSession;
use crate::models::Collection;
use crate::policy;
use crate::routes::{require_user, StatusResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/collections",
            get(list_collections).post(create_collection),
        )
        .route("/api/collections/{name}", delete(delete_collection))
}

/// List the user's collections, most recently created first.
async fn list_collections(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<Collection>>> {
    let user = require_user(&state, &session).await?;
    let collections = state.store.get_collections(&user.id).await?;
    Ok(Json(collections))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 50, message = "at most 50 boards per collection"))]
    pub boards: Vec<String>,
}

/// Create (or replace) a named collection.
///
/// The quota check runs before the insert so a rejected request leaves no
/// trace in the store.
async fn create_collection(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Json(req): Json<CreateCollectionRequest>,
) -> Result<Json<StatusResponse>> {
    let user = require_user(&state, &session).await?;

    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Replacing an existing name never consumes quota.
    let existing = state.store.get_collections(&user.id).await?;
    if !existing.iter().any(|c| c.name == req.name) {
        policy::check_collection_quota(user.plan_type, existing.len() as i64)?;
    }

    state
        .store
        .create_collection(&user.id, &req.name, &req.boards)
        .await?;

    Ok(Json(StatusResponse::success()))
}

/// Delete a collection by name. Deleting an absent name succeeds.
async fn delete_collection(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Path(name): Path<String>,
) -> Result<Json<StatusResponse>> {
    let user = require_user(&state, &session).await?;
    state.store.delete_collection(&user.id, &name).await?;
    Ok(Json(StatusResponse::success()))
}
