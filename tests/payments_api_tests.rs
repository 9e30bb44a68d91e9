// SPDX-License-Identifier: MIT

//! Payment verification tests through the router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use hmac::{Hmac, Mac};
use rootsearch_gateway::models::PlanType;
use sha2::Sha256;
use tower::ServiceExt;

mod common;

type HmacSha256 = Hmac<Sha256>;

fn sign(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify_request(token: &str, order_id: &str, payment_id: &str, signature: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/payments/verify")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{"razorpay_order_id":"{order_id}","razorpay_payment_id":"{payment_id}","razorpay_signature":"{signature}"}}"#
        )))
        .unwrap()
}

#[tokio::test]
async fn test_verified_payment_upgrades_plan() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    assert_eq!(user.plan_type, PlanType::Free);
    let token = common::session_token(&state, &user);

    let signature = sign("order_1", "pay_1", &state.config.razorpay_key_secret);
    let response = app
        .oneshot(verify_request(&token, "order_1", "pay_1", &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let upgraded = state
        .store
        .get_user_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(upgraded.plan_type, PlanType::Pro);
}

#[tokio::test]
async fn test_invalid_signature_leaves_plan_unchanged() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let response = app
        .oneshot(verify_request(&token, "order_1", "pay_1", "deadbeef"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = state
        .store
        .get_user_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.plan_type, PlanType::Free);
}

#[tokio::test]
async fn test_signature_for_other_order_rejected() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    // Valid signature, but for a different order/payment pair
    let signature = sign("order_2", "pay_2", &state.config.razorpay_key_secret);
    let response = app
        .oneshot(verify_request(&token, "order_1", "pay_1", &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_missing_fields_rejected() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments/verify")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"razorpay_order_id":"order_1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_requires_session() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments/verify")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"razorpay_order_id":"o","razorpay_payment_id":"p","razorpay_signature":"s"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
