// SPDX-License-Identifier: MIT

//! Short-lived signed identity assertions.
//!
//! Two variants share one claim set (`sub`, `email`, `plan_type`):
//! - backend tokens (5 minutes) attached to proxied analysis-backend calls,
//! - session tokens (1 hour) held by the browser and set as the login cookie.
//!
//! The plan claim is a point-in-time snapshot; the backend sees plan changes
//! no faster than token re-issuance.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;
use crate::models::{PlanType, User};

/// Inter-service tokens are minted per proxied call.
pub const BACKEND_TOKEN_TTL_SECS: u64 = 5 * 60;
/// Browser-held tokens; the client re-mints shortly before expiry.
pub const SESSION_TOKEN_TTL_SECS: u64 = 60 * 60;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (local user id)
    pub sub: String,
    /// Email (store lookup key)
    pub email: String,
    /// Plan tier snapshot at mint time
    pub plan_type: PlanType,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

fn mint(user: &User, ttl_secs: u64, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        plan_type: user.plan_type,
        iat: now,
        exp: now + ttl_secs as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Mint a token for a single proxied backend call.
pub fn mint_backend_token(user: &User, signing_key: &[u8]) -> anyhow::Result<String> {
    mint(user, BACKEND_TOKEN_TTL_SECS, signing_key)
}

/// Mint a browser-held session token.
pub fn mint_session_token(user: &User, signing_key: &[u8]) -> anyhow::Result<String> {
    mint(user, SESSION_TOKEN_TTL_SECS, signing_key)
}

/// Verify a token and return its claims.
pub fn verify_token(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}
