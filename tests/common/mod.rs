#![allow(dead_code)]

use std::sync::Arc;

use artisan_market_api::{
    auth::{consts, AuthConfig, AuthService, TokenSubject},
    build_router,
    clients::ServientregaClient,
    config::{AppConfig, CarrierConfig},
    db,
    handlers::{AppServices, Integrations},
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_JWT_SECRET: &str = "artisan_market_test_secret_key_long_enough_for_hs256_signing";

/// A signed-in caller: subject id plus bearer token.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub token: String,
}

/// Application harness backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    auth: Arc<AuthService>,
    pub artisan: Caller,
    pub other_artisan: Caller,
    pub moderator: Caller,
    pub admin: Caller,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_carrier(CarrierConfig::default()).await
    }

    /// Builds the app with a specific carrier configuration, usually pointed at a mock server.
    pub async fn with_carrier(carrier: CarrierConfig) -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir");
        let db_path = db_dir.path().join("artisan_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            TEST_JWT_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.carrier = carrier;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let db_arc = Arc::new(pool);

        let auth = Arc::new(AuthService::new(AuthConfig::from(&cfg)));
        let integrations = Integrations {
            classifier: None,
            email: None,
            carrier: Arc::new(
                ServientregaClient::new(cfg.carrier.clone()).expect("carrier client"),
            ),
        };
        let services = AppServices::new(db_arc.clone(), &cfg, integrations);

        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
            auth: auth.clone(),
        };
        let router = build_router(state.clone());

        let artisan = mint(&auth, &[]);
        let other_artisan = mint(&auth, &[]);
        let moderator = mint(&auth, &[consts::ROLE_MODERATOR]);
        let admin = mint(&auth, &[consts::ROLE_ADMIN]);

        Self {
            router,
            state,
            auth,
            artisan,
            other_artisan,
            moderator,
            admin,
            _db_dir: db_dir,
        }
    }

    /// Mints a token for a fresh subject holding `roles`.
    pub fn caller_with_roles(&self, roles: &[&str]) -> Caller {
        mint(&self.auth, roles)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a request as `caller` and returns the status with the decoded body.
    pub async fn call(
        &self,
        caller: &Caller,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body, Some(&caller.token)).await;
        read_json(response).await
    }

    /// Creates a shop owned by `owner` and returns its JSON representation.
    pub async fn create_shop(&self, owner: &Caller, name: &str, region: &str) -> Value {
        let (status, body) = self
            .call(
                owner,
                Method::POST,
                "/api/v1/shops",
                Some(serde_json::json!({
                    "user_id": owner.id,
                    "shop_name": name,
                    "description": "Tejidos a mano",
                    "craft_type": "textiles",
                    "region": region,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create shop failed: {body}");
        body["data"].clone()
    }
}

fn mint(auth: &AuthService, roles: &[&str]) -> Caller {
    let id = Uuid::new_v4();
    let token = auth
        .generate_token(&TokenSubject {
            user_id: id.to_string(),
            name: Some("Test Artisan".to_string()),
            email: Some(format!("{}@example.com", id.simple())),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        })
        .expect("sign test token");
    Caller { id, token }
}

/// Splits a response into status and JSON body (`Value::Null` when empty).
pub async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
