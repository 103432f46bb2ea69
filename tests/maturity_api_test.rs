mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{Caller, TestApp};
use serde_json::{json, Value};

async fn record_score(app: &TestApp, caller: &Caller, scores: [i32; 4]) -> Value {
    let (status, body) = app
        .call(
            caller,
            Method::POST,
            "/api/v1/maturity-scores",
            Some(json!({
                "user_id": caller.id,
                "idea_validation": scores[0],
                "user_experience": scores[1],
                "market_fit": scores[2],
                "monetization": scores[3],
                "profile_data": {"etapa": "crecimiento"},
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create score failed: {body}");
    // Keeps created_at strictly ordered between snapshots.
    tokio::time::sleep(Duration::from_millis(5)).await;
    body["data"].clone()
}

#[tokio::test]
async fn score_view_includes_total() {
    let app = TestApp::new().await;
    let score = record_score(&app, &app.artisan, [40, 60, 50, 30]).await;
    assert_eq!(score["total_score"], 45);
    assert_eq!(score["profile_data"]["etapa"], "crecimiento");
}

#[tokio::test]
async fn out_of_range_scores_are_rejected() {
    let app = TestApp::new().await;
    let (status, _) = app
        .call(
            &app.artisan,
            Method::POST,
            "/api/v1/maturity-scores",
            Some(json!({
                "user_id": app.artisan.id,
                "idea_validation": 101,
                "user_experience": 0,
                "market_fit": 0,
                "monetization": 0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn history_average_and_evolution() {
    let app = TestApp::new().await;
    let me = app.artisan.clone();
    record_score(&app, &me, [40, 40, 40, 40]).await;
    record_score(&app, &me, [50, 42, 30, 41]).await;

    let base = format!("/api/v1/maturity-scores/user/{}", me.id);

    let (status, body) = app.call(&me, Method::GET, &base, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["idea_validation"], 50);

    let (_, body) = app.call(&me, Method::GET, &format!("{base}/latest"), None).await;
    assert_eq!(body["data"]["market_fit"], 30);

    let (_, body) = app.call(&me, Method::GET, &format!("{base}/average"), None).await;
    assert_eq!(body["data"]["idea_validation"], 45);
    assert_eq!(body["data"]["user_experience"], 41);
    assert_eq!(body["data"]["market_fit"], 35);
    assert_eq!(body["data"]["monetization"], 41);
    assert_eq!(body["data"]["total_average"], 41);

    let (_, body) = app
        .call(&me, Method::GET, &format!("{base}/evolution"), None)
        .await;
    assert_eq!(body["data"]["trend"]["idea_validation"], "up");
    assert_eq!(body["data"]["trend"]["user_experience"], "stable");
    assert_eq!(body["data"]["trend"]["market_fit"], "down");
    assert_eq!(body["data"]["trend"]["monetization"], "stable");
}

#[tokio::test]
async fn other_users_scores_are_private() {
    let app = TestApp::new().await;
    let score = record_score(&app, &app.artisan, [10, 20, 30, 40]).await;
    let id = score["id"].as_str().unwrap();

    let (status, _) = app
        .call(
            &app.other_artisan,
            Method::GET,
            &format!("/api/v1/maturity-scores/{id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(&app.moderator, Method::GET, &format!("/api/v1/maturity-scores/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(&app.artisan, Method::GET, "/api/v1/maturity-scores/stats", None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn global_stats_count_distinct_users() {
    let app = TestApp::new().await;
    record_score(&app, &app.artisan, [20, 20, 20, 20]).await;
    record_score(&app, &app.artisan, [40, 40, 40, 40]).await;
    record_score(&app, &app.other_artisan, [60, 60, 60, 60]).await;

    let (status, body) = app
        .call(&app.moderator, Method::GET, "/api/v1/maturity-scores/stats", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_users"], 2);
    assert_eq!(body["data"]["average_scores"]["total_average"], 40);
}

#[tokio::test]
async fn update_and_delete_score() {
    let app = TestApp::new().await;
    let score = record_score(&app, &app.artisan, [10, 10, 10, 10]).await;
    let uri = format!("/api/v1/maturity-scores/{}", score["id"].as_str().unwrap());

    let (status, body) = app
        .call(&app.artisan, Method::PATCH, &uri, Some(json!({"monetization": 50})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["monetization"], 50);
    assert_eq!(body["data"]["total_score"], 20);

    let (status, _) = app.call(&app.artisan, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.call(&app.artisan, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
