// SPDX-License-Identifier: MIT

//! JWT minting and verification tests.
//!
//! These tests verify that tokens minted by the identity bridge can be
//! decoded by the auth middleware and the backend, catching claim-shape
//! incompatibilities early.

use rootsearch_gateway::auth::{
    mint_backend_token, mint_session_token, verify_token, BACKEND_TOKEN_TTL_SECS,
    SESSION_TOKEN_TTL_SECS,
};
use rootsearch_gateway::models::{PlanType, User};
use std::time::{SystemTime, UNIX_EPOCH};

fn test_user(plan: PlanType) -> User {
    User {
        id: "google-123".to_string(),
        email: "a@x.com".to_string(),
        name: "Someone".to_string(),
        image: None,
        provider: "google".to_string(),
        plan_type: plan,
        subscription_status: "active".to_string(),
        credits_total: 10,
        credits_used: 0,
        next_billing_date: None,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        last_login: None,
    }
}

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_session_token_roundtrip() {
    let key = b"test_signing_key_32_bytes_long!!";
    let user = test_user(PlanType::Pro);

    let token = mint_session_token(&user, key).expect("mint");
    let claims = verify_token(&token, key).expect("verify");

    assert_eq!(claims.sub, "google-123");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.plan_type, PlanType::Pro);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_backend_token_carries_plan_snapshot() {
    let key = b"test_signing_key_32_bytes_long!!";

    let token = mint_backend_token(&test_user(PlanType::Free), key).expect("mint");
    let claims = verify_token(&token, key).expect("verify");
    assert_eq!(claims.plan_type, PlanType::Free);

    let token = mint_backend_token(&test_user(PlanType::Enterprise), key).expect("mint");
    let claims = verify_token(&token, key).expect("verify");
    assert_eq!(claims.plan_type, PlanType::Enterprise);
}

#[test]
fn test_backend_token_expires_in_minutes() {
    let key = b"test_signing_key_32_bytes_long!!";
    let token = mint_backend_token(&test_user(PlanType::Free), key).expect("mint");
    let claims = verify_token(&token, key).expect("verify");

    let now = now_secs();
    // Five-minute window, with slack for the clock ticking during the test
    assert!(claims.exp <= now + BACKEND_TOKEN_TTL_SECS as usize + 5);
    assert!(claims.exp >= now + BACKEND_TOKEN_TTL_SECS as usize - 5);
}

#[test]
fn test_session_token_expires_in_an_hour() {
    let key = b"test_signing_key_32_bytes_long!!";
    let token = mint_session_token(&test_user(PlanType::Free), key).expect("mint");
    let claims = verify_token(&token, key).expect("verify");

    let now = now_secs();
    assert!(claims.exp <= now + SESSION_TOKEN_TTL_SECS as usize + 5);
    assert!(claims.exp >= now + SESSION_TOKEN_TTL_SECS as usize - 5);
}

#[test]
fn test_verify_rejects_wrong_key() {
    let token = mint_session_token(&test_user(PlanType::Free), b"correct_key_32_bytes_long!!!!!!!")
        .expect("mint");

    assert!(verify_token(&token, b"wrong_key_32_bytes_long!!!!!!!!!").is_err());
}

#[test]
fn test_verify_rejects_garbage() {
    assert!(verify_token("not.a.jwt", b"key").is_err());
    assert!(verify_token("", b"key").is_err());
}
