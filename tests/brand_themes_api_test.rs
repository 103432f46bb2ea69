mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

fn theme_body(theme_id: &str, user_id: uuid::Uuid) -> serde_json::Value {
    json!({
        "theme_id": theme_id,
        "palette": {"primary": "#8B4513", "secondary": "#F5DEB3"},
        "style_context": {"mood": "cálido"},
        "preview_description": "Tonos tierra",
        "user_id": user_id,
    })
}

#[tokio::test]
async fn create_and_fetch_brand_theme() {
    let app = TestApp::new().await;
    let owner = app.artisan.clone();

    let (status, body) = app
        .call(
            &owner,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("telar-tierra", owner.id)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["version"], 1);
    assert_eq!(body["data"]["is_active"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(&owner, Method::GET, &format!("/api/v1/brand-themes/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["theme_id"], "telar-tierra");

    let (status, body) = app
        .call(
            &owner,
            Method::GET,
            "/api/v1/brand-themes/by-theme-id/telar-tierra",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
}

#[tokio::test]
async fn duplicate_theme_id_conflicts() {
    let app = TestApp::new().await;
    let owner = app.artisan.clone();

    let (status, _) = app
        .call(
            &owner,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("duplicado", owner.id)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            &owner,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("duplicado", owner.id)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn palette_must_be_an_object() {
    let app = TestApp::new().await;
    let (status, _) = app
        .call(
            &app.artisan,
            Method::POST,
            "/api/v1/brand-themes",
            Some(json!({"theme_id": "plano", "palette": "rojo"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_bumps_version_and_delete_removes() {
    let app = TestApp::new().await;
    let owner = app.artisan.clone();

    let (_, body) = app
        .call(
            &owner,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("versionado", owner.id)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(
            &owner,
            Method::PATCH,
            &format!("/api/v1/brand-themes/{id}"),
            Some(json!({"preview_description": "Tonos mar"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], 2);
    assert_eq!(body["data"]["preview_description"], "Tonos mar");

    let (status, _) = app
        .call(&owner, Method::DELETE, &format!("/api/v1/brand-themes/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .call(&owner, Method::GET, &format!("/api/v1/brand-themes/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn activation_deactivates_owners_other_themes() {
    let app = TestApp::new().await;
    let owner = app.artisan.clone();

    let mut ids = Vec::new();
    for theme_id in ["primero", "segundo"] {
        let (_, body) = app
            .call(
                &owner,
                Method::POST,
                "/api/v1/brand-themes",
                Some(theme_body(theme_id, owner.id)),
            )
            .await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let (status, body) = app
        .call(
            &owner,
            Method::POST,
            &format!("/api/v1/brand-themes/{}/activate", ids[1]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], true);

    let (_, body) = app
        .call(&owner, Method::GET, &format!("/api/v1/brand-themes/{}", ids[0]), None)
        .await;
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/brand-themes", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_owner_or_moderator_changes_a_theme() {
    let app = TestApp::new().await;
    let owner = app.artisan.clone();

    let (_, body) = app
        .call(
            &owner,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("propio", owner.id)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/brand-themes/{id}");

    let (status, _) = app
        .call(
            &app.other_artisan,
            Method::PATCH,
            &uri,
            Some(json!({"preview_description": "ajeno"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(&app.other_artisan, Method::POST, &format!("{uri}/activate"), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(&app.other_artisan, Method::DELETE, &uri, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(
            &owner,
            Method::PATCH,
            &uri,
            Some(json!({"user_id": app.other_artisan.id})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(
            &app.other_artisan,
            Method::POST,
            "/api/v1/brand-themes",
            Some(theme_body("suplantado", owner.id)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(
            &app.moderator,
            Method::PATCH,
            &uri,
            Some(json!({"preview_description": "revisado"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], 2);

    let (status, _) = app
        .call(&owner, Method::DELETE, &uri, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
