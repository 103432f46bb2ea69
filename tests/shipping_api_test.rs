mod common;

use artisan_market_api::config::CarrierConfig;
use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cart_item(shop_id: Uuid, shop_name: &str, origin: &str) -> Value {
    json!({
        "product_id": Uuid::new_v4(),
        "shop_id": shop_id,
        "shop_name": shop_name,
        "origin_city_code": origin,
        "quantity": 2,
        "price": "45000",
        "weight": 0.8,
    })
}

fn amount(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().expect("numeric string"),
        other => other.as_f64().expect("number"),
    }
}

#[tokio::test]
async fn each_shop_is_quoted_and_failures_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "carrier-token"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quote"))
        .and(header("authorization", "Bearer carrier-token"))
        .and(body_partial_json(json!({"IdDaneCiudadOrigen": "05001000"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ValorFlete": 21000, "TiempoEntrega": 3})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quote"))
        .and(body_partial_json(json!({"IdDaneCiudadOrigen": "76001000"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = TestApp::with_carrier(CarrierConfig {
        auth_url: format!("{}/login", server.uri()),
        quote_url: format!("{}/quote", server.uri()),
        login: Some("tienda".into()),
        password: Some("secreto".into()),
        ..Default::default()
    })
    .await;

    let medellin = Uuid::new_v4();
    let cali = Uuid::new_v4();
    let (status, body) = app
        .call(
            &app.artisan,
            Method::POST,
            "/api/v1/shipping/quote",
            Some(json!({
                "cart_items": [
                    cart_item(medellin, "Taller Medellín", "05001"),
                    cart_item(cali, "Taller Cali", "76001"),
                    cart_item(medellin, "Taller Medellín", "05001"),
                ],
                "destination_city_code": "11001",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "quote failed: {body}");

    let shops = body["data"]["shops"].as_array().unwrap();
    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0]["shop_id"], medellin.to_string());
    assert_eq!(amount(&shops[0]["shipping_cost"]), 21000.0);
    assert_eq!(shops[0]["estimated_days"], 3);
    assert!(shops[0].get("error").is_none());

    assert_eq!(shops[1]["shop_id"], cali.to_string());
    assert_eq!(amount(&shops[1]["shipping_cost"]), 15000.0);
    assert_eq!(shops[1]["estimated_days"], 5);
    assert!(shops[1]["error"].is_string());

    assert_eq!(amount(&body["data"]["total_shipping"]), 36000.0);
}

#[tokio::test]
async fn missing_carrier_credentials_use_fallback_for_every_shop() {
    let app = TestApp::new().await;
    let (status, body) = app
        .call(
            &app.artisan,
            Method::POST,
            "/api/v1/shipping/quote",
            Some(json!({
                "cart_items": [
                    cart_item(Uuid::new_v4(), "Uno", "05001"),
                    cart_item(Uuid::new_v4(), "Dos", "05001"),
                ],
                "destination_city_code": "11001",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["data"]["total_shipping"]), 30000.0);
}

#[tokio::test]
async fn empty_cart_is_a_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app
        .call(
            &app.artisan,
            Method::POST,
            "/api/v1/shipping/quote",
            Some(json!({"cart_items": [], "destination_city_code": "11001"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
