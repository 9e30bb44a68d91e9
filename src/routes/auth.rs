// SPDX-License-Identifier: MIT

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::mint_session_token;
use crate::error::{AppError, Result};
use crate::middleware::auth::{AuthSession, SESSION_COOKIE};
use crate::models::NewUser;
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route("/auth/google/callback", get(auth_callback))
        .route("/auth/logout", post(logout))
}

/// The token-issuance endpoint sits behind the auth middleware.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/token", get(issue_token))
}

/// Query parameters for starting the OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Frontend URL to redirect back to after OAuth completes.
    /// If not provided, uses the configured frontend URL.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Start OAuth flow - redirect to Google authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
    headers: axum::http::HeaderMap,
) -> Result<Redirect> {
    let frontend_url = params
        .redirect_uri
        .unwrap_or_else(|| state.config.frontend_url.clone());

    // Encode frontend URL + timestamp in state
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    // Create the data payload: "frontend_url|timestamp_hex"
    let state_payload = format!("{}|{:x}", frontend_url, timestamp);

    // Sign the payload
    let mut mac = HmacSha256::new_from_slice(&state.config.oauth_state_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(state_payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    // Combine payload + signature: "payload|signature_hex"
    let signed_state = format!("{}|{}", state_payload, hex::encode(signature));

    // Base64 encode the whole thing for the URL
    let oauth_state = URL_SAFE_NO_PAD.encode(signed_state.as_bytes());

    let auth_url = state
        .google
        .authorize_url(&callback_url(&headers), &oauth_state);

    tracing::info!(frontend_url = %frontend_url, "Starting OAuth flow, redirecting to Google");

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    state: String,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, resolve the local user, create a session.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    // Decode and verify frontend URL from the state parameter
    let frontend_url = verify_and_decode_state(&params.state, &state.config.oauth_state_key)
        .unwrap_or_else(|| {
            tracing::warn!(
                "Invalid or tampered state parameter, falling back to default frontend URL"
            );
            state.config.frontend_url.clone()
        });

    // Check for OAuth errors
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        let redirect = format!("{}?error={}", frontend_url, urlencoding::encode(&error));
        return Ok((jar, Redirect::temporary(&redirect)));
    }

    let Some(code) = params.code else {
        let redirect = format!("{}?error=missing_code", frontend_url);
        return Ok((jar, Redirect::temporary(&redirect)));
    };

    tracing::info!("Exchanging authorization code for tokens");

    let tokens = state
        .google
        .exchange_code(&code, &callback_url(&headers))
        .await?;
    let profile = state.google.fetch_userinfo(&tokens.access_token).await?;

    // An identity without an email cannot be anchored to a user row.
    let Some(email) = profile.email.filter(|e| !e.is_empty()) else {
        tracing::warn!(subject = %profile.sub, "Login rejected: provider shared no email");
        let redirect = format!("{}?error=email_required", frontend_url);
        return Ok((jar, Redirect::temporary(&redirect)));
    };

    // Lookup-or-create. Store failures fail the login rather than reporting
    // success for a user that was never persisted.
    let user = match state.store.get_user_by_email(&email).await? {
        Some(_) => {
            state.store.update_user_login(&email).await?;
            // Re-read: the login may have re-applied the admin plan override.
            state
                .store
                .get_user_by_email(&email)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User {email} not found")))?
        }
        None => {
            state
                .store
                .create_user(NewUser {
                    id: profile.sub.clone(),
                    email: email.clone(),
                    name: profile.name.unwrap_or_default(),
                    image: profile.picture,
                    provider: "google".to_string(),
                })
                .await?
        }
    };

    tracing::info!(user_id = %user.id, email = %user.email, "OAuth successful");

    let jwt = mint_session_token(&user, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let mut cookie = Cookie::new(SESSION_COOKIE, jwt);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    if frontend_url.starts_with("https://") {
        cookie.set_secure(true);
    }

    Ok((jar.add(cookie), Redirect::temporary(&frontend_url)))
}

/// Response for the token-issuance endpoint.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a fresh browser-held token for the authenticated session.
///
/// The client caches it until shortly before expiry; a 401 downstream just
/// triggers another mint.
async fn issue_token(
    State(state): State<Arc<AppState>>,
    axum::Extension(session): axum::Extension<AuthSession>,
) -> Result<Json<TokenResponse>> {
    let user = state
        .store
        .get_user_by_email(&session.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.email)))?;

    let token = mint_session_token(&user, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok(Json(TokenResponse { token }))
}

/// Logout - clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.set_http_only(true);
    removal.set_same_site(SameSite::Lax);
    removal.make_removal();

    (jar.add(removal), StatusCode::NO_CONTENT)
}

/// Build this service's OAuth callback URL from the request Host header.
fn callback_url(headers: &axum::http::HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            std::env::var("API_HOST").unwrap_or_else(|_| "localhost:8080".to_string())
        });

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}/auth/google/callback", scheme, host)
}

/// Verify HMAC signature and decode the frontend URL from the OAuth state parameter.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Format is "frontend_url|timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    if parts.len() != 3 {
        return None;
    }

    let frontend_url = parts[0];
    let timestamp_hex = parts[1];
    let signature_hex = parts[2];

    // Reconstruct payload and verify signature
    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(frontend_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_and_decode_state_success() {
        let secret = b"secret_key";
        let frontend_url = "https://example.com";
        let timestamp = 1234567890u128;

        let payload = format!("{}|{:x}", frontend_url, timestamp);
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        let state_data = format!("{}|{}", payload, signature);
        let encoded_state = URL_SAFE_NO_PAD.encode(state_data.as_bytes());

        let result = verify_and_decode_state(&encoded_state, secret);
        assert_eq!(result, Some(frontend_url.to_string()));
    }

    #[test]
    fn test_verify_and_decode_state_invalid_signature() {
        let secret = b"secret_key";
        let frontend_url = "https://example.com";
        let timestamp = 1234567890u128;

        let payload = format!("{}|{:x}", frontend_url, timestamp);
        let signature = "invalid_signature";

        let state_data = format!("{}|{}", payload, signature);
        let encoded_state = URL_SAFE_NO_PAD.encode(state_data.as_bytes());

        let result = verify_and_decode_state(&encoded_state, secret);
        assert_eq!(result, None);
    }

    #[test]
    fn test_verify_and_decode_state_wrong_secret() {
        let secret = b"secret_key";
        let wrong_secret = b"wrong_key";
        let frontend_url = "https://example.com";
        let timestamp = 1234567890u128;

        let payload = format!("{}|{:x}", frontend_url, timestamp);
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        let state_data = format!("{}|{}", payload, signature);
        let encoded_state = URL_SAFE_NO_PAD.encode(state_data.as_bytes());

        let result = verify_and_decode_state(&encoded_state, wrong_secret);
        assert_eq!(result, None);
    }

    #[test]
    fn test_verify_and_decode_state_malformed() {
        let secret = b"secret_key";
        let encoded_state = URL_SAFE_NO_PAD.encode("invalid|format");
        let result = verify_and_decode_state(&encoded_state, secret);
        assert_eq!(result, None);
    }
}
