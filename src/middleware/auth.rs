// SPDX-License-Identifier: MIT

//! Session authentication middleware.

use crate::auth::verify_token;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "rootsearch_token";

/// Authenticated session extracted from the JWT.
///
/// Handlers still resolve the full store record by email; the session only
/// asserts identity.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
}

/// Middleware that requires a valid session token.
///
/// Rejection happens here, before any handler runs, so unauthenticated
/// requests never reach the store.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let claims =
        verify_token(&token, &state.config.jwt_secret).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let session = AuthSession {
        user_id: claims.sub,
        email: claims.email,
    };
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
