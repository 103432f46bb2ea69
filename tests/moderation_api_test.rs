mod common;

use axum::http::{Method, StatusCode};
use common::{Caller, TestApp};
use serde_json::{json, Value};

async fn categorized_product(app: &TestApp, owner: &Caller, shop_id: &str) -> Value {
    let (status, body) = app
        .call(
            owner,
            Method::POST,
            "/api/v1/products/categorize",
            Some(json!({
                "shop_id": shop_id,
                "name": "Mochila tejida",
                "description": "Mochila tejida a mano en hilo de algodón",
                "price": "180000",
                "inventory": 3,
                "weight": "0.6",
                "dimensions": {"length": 30, "width": 10, "height": 35},
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "categorize failed: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn categorized_products_wait_for_moderation() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Tejidos Wayuu", "Guajira").await;
    let categorized = categorized_product(&app, &app.artisan, shop["id"].as_str().unwrap()).await;

    let product = &categorized["product"];
    assert_eq!(product["moderation_status"], "pending_moderation");
    assert_eq!(product["active"], false);
    assert_eq!(product["shipping_data_complete"], true);
    assert_eq!(product["category"], categorized["marketplace_category"]);
}

#[tokio::test]
async fn categorize_is_limited_to_the_shop_owner() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Tejidos Wayuu", "Guajira").await;

    let (status, _) = app
        .call(
            &app.other_artisan,
            Method::POST,
            "/api/v1/products/categorize",
            Some(json!({
                "shop_id": shop["id"],
                "name": "Intruso",
                "description": "Producto ajeno",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn approval_publishes_product_and_notifies_owner() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Tejidos Wayuu", "Guajira").await;
    let categorized = categorized_product(&app, &app.artisan, shop["id"].as_str().unwrap()).await;
    let product_id = categorized["product"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?type=products",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["counts"]["pending_moderation"], 1);
    assert_eq!(body["data"]["products"][0]["shop"]["shop_name"], "Tejidos Wayuu");

    let (status, body) = app
        .call(
            &app.moderator,
            Method::POST,
            &format!("/api/v1/moderation/products/{product_id}"),
            Some(json!({
                "action": "approve_with_edits",
                "comment": "Ajustamos el nombre",
                "edits": {"name": "Mochila wayuu tejida", "unknown_field": 1},
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "moderation failed: {body}");
    assert_eq!(body["data"]["previous_status"], "pending_moderation");
    assert_eq!(body["data"]["new_status"], "approved_with_edits");
    assert_eq!(body["data"]["product"]["active"], true);
    assert_eq!(body["data"]["product"]["name"], "Mochila wayuu tejida");
    assert_eq!(body["data"]["edits_applied"], json!(["name"]));

    let (status, body) = app
        .call(
            &app.artisan,
            Method::GET,
            &format!("/api/v1/products/{product_id}/moderation-history"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["new_status"], "approved_with_edits");
    assert_eq!(body["data"][0]["edits_made"], json!({"name": "Mochila wayuu tejida"}));

    let (status, body) = app
        .call(&app.artisan, Method::GET, "/api/v1/notifications?unread_only=true", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "moderation_approve_with_edits");
    assert_eq!(notifications[0]["metadata"]["edits_applied"], json!(["name"]));

    let notification_id = notifications[0]["id"].as_str().unwrap();
    let (status, body) = app
        .call(
            &app.artisan,
            Method::PATCH,
            &format!("/api/v1/notifications/{notification_id}/read"),
            Some(json!({"read": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);

    let (status, _) = app
        .call(
            &app.other_artisan,
            Method::PATCH,
            &format!("/api/v1/notifications/{notification_id}/read"),
            Some(json!({"read": false})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejection_keeps_product_hidden() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Barro Negro", "Guajira").await;
    let categorized = categorized_product(&app, &app.artisan, shop["id"].as_str().unwrap()).await;
    let product_id = categorized["product"]["id"].as_str().unwrap();

    let (status, body) = app
        .call(
            &app.admin,
            Method::POST,
            &format!("/api/v1/moderation/products/{product_id}"),
            Some(json!({"action": "reject", "comment": "Fotos borrosas", "edits": {"name": "x"}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["new_status"], "rejected");
    assert_eq!(body["data"]["product"]["active"], false);
    assert_eq!(body["data"]["product"]["name"], "Mochila tejida");
    assert_eq!(body["data"]["edits_applied"], json!([]));
}

#[tokio::test]
async fn marketplace_approval_moves_shop_between_queues() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Madera Viva", "Guajira").await;
    let shop_id = shop["id"].as_str().unwrap();

    let (status, body) = app
        .call(
            &app.moderator,
            Method::PUT,
            &format!("/api/v1/moderation/shops/{shop_id}/marketplace-approval"),
            Some(json!({"approved": true, "comment": "Bienvenida"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["previous_approval"], false);
    assert_eq!(body["data"]["new_approval"], true);

    let (status, body) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?type=shops&filter=approved",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["counts"]["approved"], 1);
    assert_eq!(body["data"]["shops"][0]["id"], shop_id);
    assert_eq!(body["data"]["shops"][0]["approved_products"], 0);

    let (_, body) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?type=shops&filter=not_approved",
            None,
        )
        .await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn moderation_routes_require_moderator_role() {
    let app = TestApp::new().await;
    let (status, _) = app
        .call(&app.artisan, Method::GET, "/api/v1/moderation/queue", None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_queue_status_is_a_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?status=lost",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_queue_filters_by_category_group_and_subcategory() {
    let app = TestApp::new().await;
    let shop = app.create_shop(&app.artisan, "Tejidos Wayuu", "Guajira").await;
    let shop_id = shop["id"].as_str().unwrap();
    let hammock = categorized_product(&app, &app.artisan, shop_id).await;
    let bag = categorized_product(&app, &app.artisan, shop_id).await;

    let (status, _) = app
        .call(
            &app.moderator,
            Method::POST,
            &format!("/api/v1/moderation/products/{}", hammock["product"]["id"].as_str().unwrap()),
            Some(json!({
                "action": "approve_with_edits",
                "edits": {"category": "TEJEDURÍA/Hamacas"},
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?type=products&status=all&category=Tejeduria",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    let item = &body["data"]["products"][0];
    assert_eq!(item["id"], hammock["product"]["id"]);
    assert_eq!(item["subcategory"], "Hamacas");
    assert_eq!(item["category_group"], "Tejeduría");
    assert_eq!(item["category_path"], "Tejeduría > Hamacas");

    let (_, body) = app
        .call(
            &app.moderator,
            Method::GET,
            "/api/v1/moderation/queue?type=products&status=all&category=TEJEDURIA%2FChinchorros",
            None,
        )
        .await;
    assert_eq!(body["data"]["total"], 0);

    let category = bag["marketplace_category"].as_str().unwrap().replace(' ', "%20");
    let (_, body) = app
        .call(
            &app.moderator,
            Method::GET,
            &format!("/api/v1/moderation/queue?type=products&status=all&category={category}"),
            None,
        )
        .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["products"][0]["id"], bag["product"]["id"]);
}
