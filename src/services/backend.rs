// SPDX-License-Identifier: MIT

//! Analysis-backend client for proxied, user-scoped calls.
//!
//! Every call attaches a freshly minted short-lived bearer token so the
//! backend sees `{sub, email, plan_type}` without reaching into the user
//! store. Failures surface immediately; there are no retries.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// HTTP client for the analysis backend.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client for the configured base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// List tracked keywords for a user.
    pub async fn list_keywords(&self, user_id: &str, token: &str) -> Result<Value, AppError> {
        let url = format!("{}/keywords", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response_json(response).await
    }

    /// Create a tracked keyword.
    pub async fn create_keyword(
        &self,
        user_id: &str,
        token: &str,
        payload: &Value,
    ) -> Result<Value, AppError> {
        let url = format!("{}/keywords", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("user_id", user_id)])
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response_json(response).await
    }

    /// Fetch match threads for a tracked keyword.
    pub async fn keyword_matches(
        &self,
        user_id: &str,
        token: &str,
        keyword: &str,
    ) -> Result<Value, AppError> {
        let url = format!("{}/keywords/matches", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("keyword", keyword), ("user_id", user_id)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response_json(response).await
    }

    /// Mark a keyword's matches as read.
    pub async fn mark_keyword_read(
        &self,
        user_id: &str,
        token: &str,
        keyword: &str,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/keywords/{}/read",
            self.base_url,
            urlencoding::encode(keyword)
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response(response).await
    }

    /// Create a payment order for the pro subscription.
    pub async fn create_order(&self, token: &str) -> Result<Value, AppError> {
        let url = format!("{}/create-order", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response status and return an error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Upstream(format!("HTTP {status}: {body}")))
}

/// Check response and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(
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
