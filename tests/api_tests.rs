//! HTTP API tests driven through the router with `oneshot`

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use cricket_patterns::{create_router, AppState, IngestConfig, Store};

fn app_with(config: IngestConfig, live_limit: usize) -> Router {
    let store = Arc::new(Store::open_in_memory().unwrap());
    create_router(Arc::new(AppState::new(store, config, live_limit)))
}

fn app() -> Router {
    app_with(IngestConfig::default(), 30)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post_ball(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ingest/ball")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn ball(match_id: &str, ball_number: u32, runs: i32, status: &str) -> Value {
    json!({
        "match_id": match_id,
        "timestamp": format!("2025-01-01T10:00:{:02}", ball_number % 60),
        "ball_number": ball_number,
        "runs": runs,
        "is_four": runs == 4,
        "is_six": runs == 6,
        "is_wicket": runs == -1,
        "is_dot": runs == 0,
        "match_status": status,
    })
}

#[tokio::test]
async fn test_ingest_returns_success() {
    let app = app();
    let (status, body) = post_ball(&app, ball("M1", 1, 4, "LIVE")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["duplicate"], false);
    assert_eq!(body["phase"], "first_innings");
    assert_eq!(body["patterns"], json!([]));
}

#[tokio::test]
async fn test_null_status_is_live() {
    let app = app();
    let mut body = ball("M1", 1, 4, "LIVE");
    body["match_status"] = Value::Null;

    let (status, body) = post_ball(&app, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["phase"], "first_innings");
}

#[tokio::test]
async fn test_malformed_body_is_unprocessable() {
    let app = app();

    let (status, body) = post_ball(&app, json!({"match_id": "M1", "runs": 4})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid payload");

    let (status, _) = post_ball(&app, ball("M1", 0, 4, "LIVE")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post_ball(&app, ball("M1", 1, 99, "LIVE")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sixth_ball_reports_over_pattern() {
    let app = app();
    let runs = [1, 4, 0, 6, 0, 2];

    for (i, r) in runs.iter().enumerate() {
        let (status, body) = post_ball(&app, ball("M1", i as u32 + 1, *r, "LIVE")).await;
        assert_eq!(status, StatusCode::OK);
        if i < 5 {
            assert_eq!(body["patterns"], json!([]));
        } else {
            assert_eq!(body["patterns"][0]["granularity"], "over");
            assert_eq!(body["patterns"][0]["over_number"], 1);
            assert_eq!(body["patterns"][0]["signature"], "1-4-0-6-0-2");
            assert_eq!(body["patterns"][0]["prior_count"], 0);
        }
    }

    // Same over in another match sees the first one
    for (i, r) in runs.iter().enumerate() {
        let (_, body) = post_ball(&app, ball("M2", i as u32 + 1, *r, "LIVE")).await;
        if i == 5 {
            assert_eq!(body["patterns"][0]["prior_count"], 1);
            assert_eq!(body["patterns"][0]["last_match_id"], "M1");
        }
    }

    let (status, body) = get(&app, "/api/patterns/over?signature=1-4-0-6-0-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["occurrences"], 2);

    let (_, body) = get(&app, "/api/patterns/over").await;
    assert_eq!(body["patterns"][0]["signature"], "1-4-0-6-0-2");
}

#[tokio::test]
async fn test_live_view_is_newest_first_and_capped() {
    let app = app_with(IngestConfig::default(), 30);
    for n in 1..=35 {
        post_ball(&app, ball("M1", n, 1, "LIVE")).await;
    }
    post_ball(&app, ball("OTHER", 1, 1, "LIVE")).await;

    let (status, body) = get(&app, "/api/match/M1/live").await;
    assert_eq!(status, StatusCode::OK);

    let balls = body["balls"].as_array().unwrap();
    assert_eq!(balls.len(), 30);
    assert_eq!(balls[0]["ball_number"], 35);
    assert_eq!(balls[29]["ball_number"], 6);
    assert!(balls.iter().all(|b| b["match_id"] == "M1"));
    assert_eq!(balls[0]["card"], "A");
    assert_eq!(body["phase"], "first_innings");

    let (_, body) = get(&app, "/api/match/NOPE/live").await;
    assert_eq!(body["balls"], json!([]));
    assert_eq!(body["phase"], Value::Null);
}

#[tokio::test]
async fn test_innings_break_and_completion() {
    let app = app();
    post_ball(&app, ball("M1", 1, 4, "LIVE")).await;

    let (_, body) = post_ball(&app, ball("M1", 2, 0, "INNINGS_BREAK")).await;
    assert_eq!(body["phase"], "innings_break");
    assert_eq!(body["patterns"][0]["granularity"], "innings");
    assert_eq!(body["patterns"][0]["signature"], "4-0");

    let (_, body) = post_ball(&app, ball("M1", 3, 6, "LIVE")).await;
    assert_eq!(body["phase"], "second_innings");

    let (_, body) = post_ball(&app, ball("M1", 4, -1, "COMPLETED")).await;
    assert_eq!(body["phase"], "completed");
    assert_eq!(body["patterns"][0]["granularity"], "match");
    assert_eq!(body["patterns"][0]["signature"], "4-0-6--1");

    let (_, body) = get(&app, "/api/match/M1/patterns").await;
    assert_eq!(body["innings"].as_array().unwrap().len(), 1);
    assert_eq!(body["matches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ball_after_completion_is_conflict() {
    let app = app();
    post_ball(&app, ball("M1", 1, 1, "COMPLETED")).await;

    let (status, body) = post_ball(&app, ball("M1", 2, 1, "LIVE")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid transition");
}

#[tokio::test]
async fn test_lifecycle_not_enforced_accepts_ball() {
    let config = IngestConfig {
        dedupe_balls: true,
        enforce_lifecycle: false,
    };
    let app = app_with(config, 30);
    post_ball(&app, ball("M1", 1, 1, "COMPLETED")).await;

    let (status, body) = post_ball(&app, ball("M1", 2, 1, "LIVE")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "completed");
}

#[tokio::test]
async fn test_redelivered_ball_is_idempotent() {
    let app = app();
    let (_, first) = post_ball(&app, ball("M1", 1, 4, "LIVE")).await;
    let (status, second) = post_ball(&app, ball("M1", 1, 4, "LIVE")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["duplicate"], true);
    assert_eq!(second["ball_id"], first["ball_id"]);

    let (_, body) = get(&app, "/api/match/M1/live").await;
    assert_eq!(body["balls"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicates_kept_without_dedupe() {
    let config = IngestConfig {
        dedupe_balls: false,
        enforce_lifecycle: true,
    };
    let app = app_with(config, 30);
    for n in 1..=6 {
        post_ball(&app, ball("M1", n, 1, "LIVE")).await;
    }

    // Resending the sixth ball detects the over again
    let (status, resent) = post_ball(&app, ball("M1", 6, 1, "LIVE")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resent["duplicate"], false);
    assert_eq!(resent["patterns"][0]["granularity"], "over");
    assert_eq!(resent["patterns"][0]["signature"], "1-1-1-1-1-1");
    assert_eq!(resent["patterns"][0]["prior_count"], 1);

    let (_, stats) = get(&app, "/api/stats").await;
    assert_eq!(stats["over_patterns"], 2);

    // So does resending the completing ball
    let (_, first) = post_ball(&app, ball("M1", 7, 4, "COMPLETED")).await;
    assert_eq!(first["patterns"][0]["granularity"], "match");
    let (status, second) = post_ball(&app, ball("M1", 7, 4, "COMPLETED")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["duplicate"], false);
    assert_eq!(second["patterns"][0]["granularity"], "match");

    let (_, stats) = get(&app, "/api/stats").await;
    assert_eq!(stats["match_patterns"], 2);

    let (_, body) = get(&app, "/api/match/M1/live").await;
    assert_eq!(body["balls"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_stats_counts_rows() {
    let app = app();
    for n in 1..=6 {
        post_ball(&app, ball("M1", n, 2, "LIVE")).await;
    }

    let (status, body) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ball_events"], 6);
    assert_eq!(body["matches"], 1);
    assert_eq!(body["over_patterns"], 1);
}
