// SPDX-License-Identifier: MIT

//! Profile routes for authenticated users.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthSession;
use crate::policy::PlanLimits;
use crate::routes::require_user;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

/// Current user response.
///
/// `limits` carries the entitlement ceilings so the client renders upgrade
/// affordances without re-implementing policy rules.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub provider: String,
    pub plan_type: crate::models::PlanType,
    pub subscription_status: String,
    pub credits_total: i64,
    pub credits_used: i64,
    pub next_billing_date: Option<String>,
    pub created_at: String,
    pub last_login: Option<String>,
    pub limits: PlanLimits,
}

/// Get current user profile with plan and limits.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<UserResponse>> {
    let user = require_user(&state, &session).await?;

    Ok(Json(UserResponse {
        limits: PlanLimits::for_plan(user.plan_type),
        id: user.id,
        email: user.email,
        name: user.name,
        image: user.image,
        provider: user.provider,
        plan_type: user.plan_type,
        subscription_status: user.subscription_status,
        credits_total: user.credits_total,
        credits_used: user.credits_used,
        next_billing_date: user.next_billing_date,
        created_at: user.created_at,
        last_login: user.last_login,
    }))
}
