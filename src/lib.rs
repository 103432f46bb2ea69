//! Artisan Market API Library
//!
//! Storefronts, catalog moderation, promotions, shipping quotes and maturity scores
//! for an artisan marketplace, served over a JSON REST API.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod regions;
pub mod services;
pub mod tracing;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::consts as roles;
use crate::auth::{AuthRouterExt, AuthService};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<AuthService>,
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-err"), async {
                ApiResponse::<()>::error("oops".into())
            })
            .await;

        assert!(!response.success);
        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-err"));
    }
}

/// Versioned API routes with their auth gates
pub fn api_v1_routes() -> Router<AppState> {
    let public = Router::new().route("/status", get(api_status));

    let authenticated = Router::new()
        .merge(handlers::brand_themes::routes())
        .merge(handlers::shops::routes())
        .merge(handlers::products::routes())
        .merge(handlers::inventory::routes())
        .merge(handlers::promotions::routes())
        .merge(handlers::gift_cards::routes())
        .merge(handlers::shipping::routes())
        .merge(handlers::maturity::routes())
        .merge(handlers::notifications::routes())
        .with_auth();

    let moderation = Router::new()
        .merge(handlers::moderation::routes())
        .merge(handlers::admin::routes())
        .with_any_role(roles::MODERATION_ROLES);

    let admin = Router::new()
        .merge(handlers::promotions::admin_routes())
        .merge(handlers::gift_cards::admin_routes())
        .with_role(roles::ROLE_ADMIN);

    public.merge(authenticated).merge(moderation).merge(admin)
}

/// Health checks, the versioned API and Swagger UI, with request ids, tracing and the
/// auth service wired in. Transport layers (CORS, compression, timeouts) are added by the
/// server binary.
pub fn build_router(state: AppState) -> Router {
    let auth = state.auth.clone();
    let db = state.db.clone();

    Router::<AppState>::new()
        .route("/", get(|| async { "artisan-market-api up" }))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
        .nest("/health", health::health_routes(db))
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Inject AuthService into request extensions for auth middleware
        .layer(axum::middleware::from_fn_with_state(
            auth,
            |State(auth): State<Arc<AuthService>>,
             mut req: axum::http::Request<axum::body::Body>,
             next: axum::middleware::Next| async move {
                req.extensions_mut().insert(auth);
                next.run(req).await
            },
        ))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}

// API status endpoint
async fn api_status(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    let database = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(ApiResponse::success(json!({
        "service": "artisan-market-api",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "checks": { "database": database },
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
