// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error type mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use zkb_dashboard::error::AppError;

mod common;
use common::body_string;

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "not_found"),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "bad_request"),
        (
            AppError::ActivityApi("x".into()),
            StatusCode::BAD_GATEWAY,
            "activity_api_error",
        ),
        (
            AppError::NamesApi("x".into()),
            StatusCode::BAD_GATEWAY,
            "names_api_error",
        ),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
        ),
    ];

    for (err, status, code) in cases {
        assert_eq!(err.status_and_code(), (status, code), "{:?}", err);
    }
}

#[test]
fn test_upstream_errors() {
    assert!(AppError::ActivityApi("timeout".into()).is_upstream());
    assert!(AppError::NamesApi("HTTP 503".into()).is_upstream());
    assert!(!AppError::NotFound("2115038999".into()).is_upstream());
    assert!(!AppError::Internal(anyhow::anyhow!("bug")).is_upstream());
}

#[tokio::test]
async fn test_internal_details_hidden() {
    let response = AppError::Internal(anyhow::anyhow!("secret path /etc/x")).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response).await;
    assert!(!body.contains("secret"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "internal_error");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_bad_request_details_shown() {
    let response = AppError::BadRequest("limit must be between 1 and 50".into()).into_response();

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["details"], "limit must be between 1 and 50");
}
