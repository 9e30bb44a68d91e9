// SPDX-License-Identifier: MIT

//! RootSearch Gateway API Server
//!
//! Fronts the analysis backend with authentication, entitlements, and the
//! per-user store for saved opportunities and board collections.

use rootsearch_gateway::{
    config::Config,
    db::UserStore,
    services::{BackendClient, GoogleOAuthClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting RootSearch gateway");

    // Open the user store, creating the schema on first access
    let store = UserStore::connect(&config.database_path, config.admin_emails.clone())
        .await
        .expect("Failed to open user store");

    let google = GoogleOAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    let backend = BackendClient::new(config.api_base_url.clone());
    tracing::info!(api_base_url = %config.api_base_url, "Backend client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        google,
        backend,
    });

    // Build router
    let app = rootsearch_gateway::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rootsearch_gateway=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
