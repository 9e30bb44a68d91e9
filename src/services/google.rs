// SPDX-License-Identifier: MIT

//! Google OAuth2 client for the federated login exchange.
//!
//! Handles:
//! - Authorization URL construction
//! - Code-for-token exchange
//! - Userinfo fetch (the `{sub, email, name, picture}` tuple the rest of
//!   the system consumes)

use serde::Deserialize;

use crate::error::AppError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth2 client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuthClient {
    /// Create a new client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            userinfo_url: USERINFO_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Point the client at stand-in endpoints. Test use only.
    pub fn with_base_urls(
        mut self,
        auth_url: String,
        token_url: String,
        userinfo_url: String,
    ) -> Self {
        self.auth_url = auth_url;
        self.token_url = token_url;
        self.userinfo_url = userinfo_url;
        self
    }

    /// Build the authorization redirect URL.
    pub fn authorize_url(&self, callback_url: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(callback_url),
            urlencoding::encode("openid email profile"),
            state
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<GoogleTokens, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", callback_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Token exchange request failed: {e}")))?;

        check_response_json(response).await
    }

    /// Fetch the profile of the authenticated user.
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Userinfo request failed: {e}")))?;

        check_response_json(response).await
    }
}

async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!("HTTP {status}: {body}")));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("JSON parse error: {e}")))
}

/// Token response from Google.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
}

/// Userinfo response: the only provider fields this system consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Stable provider subject
    pub sub: String,
    /// May be withheld; a login without an email fails
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}
