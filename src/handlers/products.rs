use crate::{
    auth::AuthUser,
    entities::{product, product_moderation_history},
    errors::ApiError,
    handlers::common::{
        created_response, ensure_owner_or_moderator, map_service_error, success_response,
        validate_input,
    },
    services::products::{CategorizeProduct, CategorizedProduct},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/categorize", post(categorize_product))
        .route("/products/:id", get(get_product))
        .route("/products/:id/moderation-history", get(product_moderation_history))
}

/// Create a product with a normalized marketplace category
///
/// The product starts in `pending_moderation` and inactive.
#[utoipa::path(
    post,
    path = "/api/v1/products/categorize",
    request_body = CategorizeProduct,
    responses(
        (status = 201, description = "Product created and categorized", body = CategorizedProduct),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the shop owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Shop not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn categorize_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CategorizeProduct>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let shop = state
        .services
        .shops
        .get(payload.shop_id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, shop.user_id)?;
    let categorized = state
        .services
        .products
        .categorize(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(categorized))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product returned", body = product::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(product))
}

/// Moderation decisions taken on a product, newest first
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/moderation-history",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Moderation history", body = [product_moderation_history::Model])
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn product_moderation_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .services
        .moderation
        .history(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(history))
}
