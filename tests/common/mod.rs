// SPDX-License-Identifier: MIT

use rootsearch_gateway::auth::mint_session_token;
use rootsearch_gateway::config::Config;
use rootsearch_gateway::db::UserStore;
use rootsearch_gateway::models::{NewUser, User};
use rootsearch_gateway::routes::create_router;
use rootsearch_gateway::services::{BackendClient, GoogleOAuthClient};
use rootsearch_gateway::AppState;
use std::sync::Arc;

/// Create an in-memory user store with the test admin allow-list.
#[allow(dead_code)]
pub async fn test_store() -> UserStore {
    UserStore::connect_in_memory(Config::test_default().admin_emails)
        .await
        .expect("Failed to open in-memory store")
}

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = UserStore::connect_in_memory(config.admin_emails.clone())
        .await
        .expect("Failed to open in-memory store");

    let google = GoogleOAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );
    let backend = BackendClient::new(config.api_base_url.clone());

    let state = Arc::new(AppState {
        config,
        store,
        google,
        backend,
    });

    (create_router(state.clone()), state)
}

/// Insert a user the way a first login would.
#[allow(dead_code)]
pub async fn seed_user(store: &UserStore, email: &str) -> User {
    store
        .create_user(NewUser {
            id: format!("google-{email}"),
            email: email.to_string(),
            name: "Test User".to_string(),
            image: None,
            provider: "google".to_string(),
        })
        .await
        .expect("Failed to seed user")
}

/// Mint a session token for a seeded user.
#[allow(dead_code)]
pub fn session_token(state: &AppState, user: &User) -> String {
    mint_session_token(user, &state.config.jwt_secret).expect("Failed to mint session token")
}
