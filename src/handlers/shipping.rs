use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{map_service_error, success_response},
    services::shipping::{QuoteRequest, ShippingQuote},
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/shipping/quote", post(quote_shipping))
}

/// Quote shipping for a cart, one carrier quote per shop
///
/// Shops the carrier cannot quote get the standard rate and an `error` note.
#[utoipa::path(
    post,
    path = "/api/v1/shipping/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Cart quoted", body = ShippingQuote),
        (status = 400, description = "Empty cart or invalid item", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shipping"
)]
pub async fn quote_shipping(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<QuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state
        .services
        .shipping
        .quote(payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(quote))
}
