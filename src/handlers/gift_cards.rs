use crate::{
    auth::AuthUser,
    entities::gift_card,
    errors::ApiError,
    handlers::common::{created_response, map_service_error, success_response, validate_input},
    services::gift_cards::{GenerateGiftCards, GeneratedGiftCards},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/gift-cards/:code", get(get_gift_card))
}

/// Issuing cards follows a paid order and is restricted to admins
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/gift-cards/generate", post(generate_gift_cards))
}

/// Issue the gift cards bought in an order and email the purchaser
#[utoipa::path(
    post,
    path = "/api/v1/gift-cards/generate",
    request_body = GenerateGiftCards,
    responses(
        (status = 201, description = "Gift cards issued", body = GeneratedGiftCards),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "gift-cards"
)]
pub async fn generate_gift_cards(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<GenerateGiftCards>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let generated = state
        .services
        .gift_cards
        .generate(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(generated))
}

/// Balance lookup; the code is matched case-insensitively
#[utoipa::path(
    get,
    path = "/api/v1/gift-cards/{code}",
    params(("code" = String, Path, description = "Gift card code")),
    responses(
        (status = 200, description = "Gift card returned", body = gift_card::Model),
        (status = 404, description = "Unknown code", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "gift-cards"
)]
pub async fn get_gift_card(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .services
        .gift_cards
        .get_by_code(&code)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(card))
}
