// SPDX-License-Identifier: MIT

//! Collection resource tests through the router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_list_delete_collection() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/collections")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name":"Research","boards":["gadgets","business"]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "success");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/collections")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Research");
    assert_eq!(listed[0]["boards"], serde_json::json!(["gadgets", "business"]));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/collections/Research")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.store.count_collections(&user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_handles_encoded_names() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    state
        .store
        .create_collection(&user.id, "My Boards", &["g".to_string()])
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/collections/My%20Boards")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.store.count_collections(&user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_collection_empty_name_rejected() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/collections")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"","boards":["g"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.store.count_collections(&user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_collection_name_too_long_rejected() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let long_name = "a".repeat(101);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/collections")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"name":"{long_name}","boards":["g"]}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_absent_collection_succeeds() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state.store, "a@x.com").await;
    let token = common::session_token(&state, &user);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/collections/Nope")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
