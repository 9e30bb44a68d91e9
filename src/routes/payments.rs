// SPDX-License-Identifier: MIT

//! Payment routes: order creation proxy and the verified-payment callback
//! that upgrades the session user's plan.

use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::auth::mint_backend_token;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthSession;
use crate::models::PlanType;
use crate::routes::require_user;
use crate::services::verify_payment_signature;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/payments/order", post(create_order))
        .route("/api/payments/verify", post(verify_payment))
}

/// Create a payment order via the backend.
async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &session).await?;
    let token = mint_backend_token(&user, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let order = state.backend.create_order(&token).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyPaymentResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Verify a payment signature and upgrade the session user to pro.
///
/// The upgraded account is always the session's own; the payload only
/// carries the processor's receipt fields.
async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AuthSession>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>> {
    let user = require_user(&state, &session).await?;

    let (Some(order_id), Some(payment_id), Some(signature)) = (
        req.razorpay_order_id,
        req.razorpay_payment_id,
        req.razorpay_signature,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    if !verify_payment_signature(
        &order_id,
        &payment_id,
        &signature,
        &state.config.razorpay_key_secret,
    ) {
        tracing::warn!(user_id = %user.id, order_id = %order_id, "Invalid payment signature");
        return Err(AppError::BadRequest(
            "Invalid payment signature".to_string(),
        ));
    }

    state.store.update_user_plan(&user.id, PlanType::Pro).await?;

    tracing::info!(user_id = %user.id, "Payment verified, plan upgraded to pro");

    Ok(Json(VerifyPaymentResponse {
        status: "success",
        message: "Plan updated to Pro",
    }))
}
