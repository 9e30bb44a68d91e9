// SPDX-License-Identifier: MIT

//! RootSearch gateway: the web-facing API for the RootSearch market
//! intelligence product.
//!
//! This crate owns user identity, plan entitlements, and per-user saved
//! state; search and analysis are delegated to the separate backend service
//! it proxies.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;
use services::{BackendClient, GoogleOAuthClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: UserStore,
    pub google: GoogleOAuthClient,
    pub backend: BackendClient,
}
