use crate::{
    auth::AuthUser,
    entities::{inventory_movement, product_variant},
    errors::ApiError,
    handlers::common::{
        created_response, ensure_owner_or_moderator, map_service_error, success_response,
        validate_input,
    },
    services::inventory::{CreateVariant, MovementRecorded, RecordMovement},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovementListQuery {
    /// Maximum movements returned, newest first
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockQuery {
    pub shop_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory/variants", post(create_variant))
        .route("/inventory/variants/:id", get(get_variant))
        .route(
            "/inventory/variants/:id/movements",
            get(list_movements).post(record_movement),
        )
        .route("/inventory/low-stock", get(low_stock))
        .route("/products/:id/variants", get(list_product_variants))
}

/// Create a sellable variant; opening stock is recorded as an IN movement
#[utoipa::path(
    post,
    path = "/api/v1/inventory/variants",
    request_body = CreateVariant,
    responses(
        (status = 201, description = "Variant created", body = product_variant::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Product belongs to another shop", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already exists", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn create_variant(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVariant>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let owner = state
        .services
        .inventory
        .product_owner(payload.product_id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, owner)?;
    let variant = state
        .services
        .inventory
        .create_variant(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(variant))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/variants/{id}",
    params(("id" = Uuid, Path, description = "Variant ID")),
    responses(
        (status = 200, description = "Variant returned", body = product_variant::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn get_variant(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let variant = state
        .services
        .inventory
        .get_variant(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(variant))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/variants",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Variants of the product", body = [product_variant::Model])
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn list_product_variants(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let variants = state
        .services
        .inventory
        .list_variants(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(variants))
}

/// Record an IN, OUT or ADJUST movement against a variant
#[utoipa::path(
    post,
    path = "/api/v1/inventory/variants/{id}/movements",
    params(("id" = Uuid, Path, description = "Variant ID")),
    request_body = RecordMovement,
    responses(
        (status = 201, description = "Movement recorded", body = MovementRecorded),
        (status = 400, description = "Invalid quantity", body = crate::errors::ErrorResponse),
        (status = 403, description = "Variant belongs to another shop", body = crate::errors::ErrorResponse),
        (status = 404, description = "Variant not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent stock change", body = crate::errors::ErrorResponse),
        (status = 422, description = "Stock would go negative", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn record_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordMovement>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let owner = state
        .services
        .inventory
        .variant_owner(id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, owner)?;
    let recorded = state
        .services
        .inventory
        .record_movement(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(recorded))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/variants/{id}/movements",
    params(("id" = Uuid, Path, description = "Variant ID"), MovementListQuery),
    responses(
        (status = 200, description = "Movements, newest first", body = [inventory_movement::Model]),
        (status = 404, description = "Variant not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn list_movements(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<MovementListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = state
        .services
        .inventory
        .list_movements(id, query.limit)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(movements))
}

/// Variants at or below their minimum stock
#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    params(LowStockQuery),
    responses(
        (status = 200, description = "Low-stock variants", body = [product_variant::Model])
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let variants = state
        .services
        .inventory
        .low_stock(query.shop_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(variants))
}
