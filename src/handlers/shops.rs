use crate::{
    auth::AuthUser,
    entities::{artisan_shop, product},
    errors::ApiError,
    handlers::common::{
        created_response, ensure_owner_or_moderator, map_service_error, no_content_response,
        success_response, total_pages, validate_input, PaginationParams,
    },
    services::shops::{CreateShop, PatchShop, ShopFilter},
    AppState, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shops", get(list_shops).post(create_shop))
        .route("/shops/by-slug/:slug", get(get_shop_by_slug))
        .route("/shops/by-user/:user_id", get(get_shop_by_user))
        .route(
            "/shops/:id",
            get(get_shop).patch(update_shop).delete(delete_shop),
        )
        .route("/shops/:id/publish", post(publish_shop))
        .route("/shops/:id/products", get(list_shop_products))
}

/// Create a shop; the slug is derived from the name when absent
#[utoipa::path(
    post,
    path = "/api/v1/shops",
    request_body = CreateShop,
    responses(
        (status = 201, description = "Shop created", body = artisan_shop::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Creating a shop for another user", body = crate::errors::ErrorResponse),
        (status = 409, description = "User already has a shop or slug taken", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShop>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    ensure_owner_or_moderator(&user, payload.user_id)?;
    let shop = state
        .services
        .shops
        .create(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(shop))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops",
    params(ShopFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of shops", body = PaginatedResponse<artisan_shop::Model>)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn list_shops(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<ShopFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = pagination.page();
    let limit = state.config.page_size(pagination.limit);
    let (items, total) = state
        .services
        .shops
        .list(filter, page, limit)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(PaginatedResponse {
        items,
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop returned", body = artisan_shop::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let shop = state.services.shops.get(id).await.map_err(map_service_error)?;
    Ok(success_response(shop))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops/by-slug/{slug}",
    params(("slug" = String, Path, description = "Shop slug")),
    responses(
        (status = 200, description = "Shop returned", body = artisan_shop::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn get_shop_by_slug(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let shop = state
        .services
        .shops
        .get_by_slug(&slug)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(shop))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops/by-user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Shop returned", body = artisan_shop::Model),
        (status = 404, description = "User has no shop", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn get_shop_by_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let shop = state
        .services
        .shops
        .get_by_user(user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(shop))
}

#[utoipa::path(
    patch,
    path = "/api/v1/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = PatchShop,
    responses(
        (status = 200, description = "Shop updated", body = artisan_shop::Model),
        (status = 403, description = "Not the shop owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug taken", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn update_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchShop>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let current = state.services.shops.get(id).await.map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, current.user_id)?;
    let shop = state
        .services
        .shops
        .update(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(shop))
}

#[utoipa::path(
    delete,
    path = "/api/v1/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 204, description = "Shop deleted"),
        (status = 403, description = "Not the shop owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn delete_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let current = state.services.shops.get(id).await.map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, current.user_id)?;
    state
        .services
        .shops
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

/// Mark the storefront as published
#[utoipa::path(
    post,
    path = "/api/v1/shops/{id}/publish",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop published", body = artisan_shop::Model),
        (status = 403, description = "Not the shop owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn publish_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let current = state.services.shops.get(id).await.map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, current.user_id)?;
    let shop = state
        .services
        .shops
        .publish(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(shop))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops/{id}/products",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Products of the shop", body = [product::Model]),
        (status = 404, description = "Shop not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn list_shop_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list_by_shop(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(products))
}
