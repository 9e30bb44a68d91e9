// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; business logic never touches the
//! process environment. In particular the admin allow-list is parsed here
//! and handed to the user store's constructor.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Non-sensitive ---
    /// Frontend URL for OAuth redirects and CORS
    pub frontend_url: String,
    /// Base URL of the analysis backend
    pub api_base_url: String,
    /// Path to the SQLite user store
    pub database_path: String,
    /// Server port
    pub port: u16,
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Emails automatically granted the pro plan at creation and on login
    pub admin_emails: Vec<String>,

    // --- Secrets ---
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// JWT signing key for session and backend tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// HMAC key for signing the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
    /// Razorpay key secret for payment signature verification
    pub razorpay_key_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/users.db".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            admin_emails: parse_admin_emails(env::var("ADMIN_EMAILS").ok().as_deref()),

            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
            razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("RAZORPAY_KEY_SECRET"))?,
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            api_base_url: "http://localhost:8000".to_string(),
            database_path: ":memory:".to_string(),
            port: 8080,
            google_client_id: "test_client_id".to_string(),
            admin_emails: vec!["admin@rootsearch.app".to_string()],
            google_client_secret: "test_secret".to_string(),
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            oauth_state_key: b"test_state_key".to_vec(),
            razorpay_key_secret: "test_razorpay_secret".to_string(),
        }
    }
}

/// Split the comma-separated allow-list, trimming whitespace and dropping
/// empty entries.
fn parse_admin_emails(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
