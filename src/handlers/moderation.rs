use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{caller_id, map_service_error, success_response},
    services::moderation::{
        MarketplaceApproval, MarketplaceApprovalOutcome, ModerateProduct, ModerationOutcome,
        ModerationQueueQuery, ProductQueue, QueueType, ShopQueue,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Product or shop queue, depending on the requested `type`
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ModerationQueue {
    Products(ProductQueue),
    Shops(ShopQueue),
}

/// Routes reserved for moderators and admins
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/moderation/queue", get(moderation_queue))
        .route("/moderation/products/:id", post(moderate_product))
        .route(
            "/moderation/shops/:id/marketplace-approval",
            put(set_marketplace_approval),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/moderation/queue",
    params(ModerationQueueQuery),
    responses(
        (status = 200, description = "Queue page with per-status counts", body = ModerationQueue),
        (status = 400, description = "Unknown status filter", body = crate::errors::ErrorResponse),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "moderation"
)]
pub async fn moderation_queue(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ModerationQueueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let moderation = &state.services.moderation;
    let queue = match query.queue_type {
        QueueType::Products => moderation
            .product_queue(&query)
            .await
            .map(ModerationQueue::Products),
        QueueType::Shops => moderation
            .shop_queue(&query)
            .await
            .map(ModerationQueue::Shops),
    }
    .map_err(map_service_error)?;
    Ok(success_response(queue))
}

/// Approve, edit, request changes on, or reject a product
///
/// Records a history row and notifies the artisan.
#[utoipa::path(
    post,
    path = "/api/v1/moderation/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ModerateProduct,
    responses(
        (status = 200, description = "Product moderated", body = ModerationOutcome),
        (status = 400, description = "Invalid edits", body = crate::errors::ErrorResponse),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "moderation"
)]
pub async fn moderate_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerateProduct>,
) -> Result<impl IntoResponse, ApiError> {
    let moderator_id = caller_id(&user)?;
    let outcome = state
        .services
        .moderation
        .moderate_product(id, moderator_id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(outcome))
}

#[utoipa::path(
    put,
    path = "/api/v1/moderation/shops/{id}/marketplace-approval",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = MarketplaceApproval,
    responses(
        (status = 200, description = "Marketplace approval updated", body = MarketplaceApprovalOutcome),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Shop not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "moderation"
)]
pub async fn set_marketplace_approval(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarketplaceApproval>,
) -> Result<impl IntoResponse, ApiError> {
    let moderator_id = caller_id(&user)?;
    let outcome = state
        .services
        .moderation
        .set_marketplace_approval(id, moderator_id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(outcome))
}
