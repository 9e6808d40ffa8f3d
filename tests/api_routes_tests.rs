// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API route tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{body_string, create_test_app, sample_source, StubNames};

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (app, _state) = create_test_app(Arc::new(sample_source()), Arc::new(StubNames::sample()));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = body_string(response).await;
    (status, serde_json::from_str(&body).expect("Body should be JSON"))
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_top_ranks_by_count() {
    let (status, json) = get_json("/api/character/2115038999/top?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subject"], "character");
    assert_eq!(
        json["wins"]["solar_systems"],
        serde_json::json!([
            { "id": 30000142, "count": 10 },
            { "id": 30000144, "count": 7 }
        ])
    );
    assert_eq!(
        json["wins"]["ships"],
        serde_json::json!([
            { "id": 22456, "count": 11 },
            { "id": 3756, "count": 8 }
        ])
    );
}

#[tokio::test]
async fn test_top_ties_keep_document_order() {
    let (_, json) = get_json("/api/character/2115038999/top").await;

    // 30000611 and 30004218 both have 2 losses; document order wins
    assert_eq!(
        json["losses"]["solar_systems"],
        serde_json::json!([
            { "id": 30000611, "count": 2 },
            { "id": 30004218, "count": 2 }
        ])
    );
}

#[tokio::test]
async fn test_top_default_limit() {
    let (_, json) = get_json("/api/character/2115038999/top").await;

    // Default limit is 5; wins have only 4 ships
    assert_eq!(json["wins"]["ships"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_top_invalid_limit() {
    let (status, json) = get_json("/api/character/2115038999/top?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_top_unknown_entity() {
    let (status, json) = get_json("/api/corporation/42/top").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_hourly_chart_config() {
    let (status, json) = get_json("/api/character/2115038999/hourly").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "bar");
    let data = json["data"]["datasets"][0]["data"].as_array().unwrap();
    assert_eq!(data.len(), 24);
    assert_eq!(data[18], 9);
    assert_eq!(data[3], 0);
}

#[tokio::test]
async fn test_top_non_numeric_id() {
    let (status, json) = get_json("/api/character/ria/top").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["details"], r#"Invalid id: "ria""#);
}
