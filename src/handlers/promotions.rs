use crate::{
    auth::AuthUser,
    entities::coupon,
    errors::ApiError,
    handlers::common::{created_response, map_service_error, success_response, validate_input},
    services::promotions::{
        ApplyPromoCode, CreateCoupon, PromoApplication, PromoValidation, ValidatePromoCode,
    },
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/promotions/validate", post(validate_promo_code))
        .route("/promotions/apply", post(apply_promo_code))
}

/// Coupon management, admins only
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/coupons", post(create_coupon))
}

/// Check a gift card or coupon code against a cart total without redeeming it
#[utoipa::path(
    post,
    path = "/api/v1/promotions/validate",
    request_body = ValidatePromoCode,
    responses(
        (status = 200, description = "Code is redeemable", body = PromoValidation),
        (status = 400, description = "Code fails a redemption rule", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown code", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "promotions"
)]
pub async fn validate_promo_code(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<ValidatePromoCode>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let validation = state
        .services
        .promotions
        .validate_promo_code(payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(validation))
}

/// Redeem a code against an order
#[utoipa::path(
    post,
    path = "/api/v1/promotions/apply",
    request_body = ApplyPromoCode,
    responses(
        (status = 200, description = "Code redeemed", body = PromoApplication),
        (status = 400, description = "Code fails a redemption rule", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown code", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent redemption", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "promotions"
)]
pub async fn apply_promo_code(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<ApplyPromoCode>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let applied = state
        .services
        .promotions
        .apply_promo_code(payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(applied))
}

#[utoipa::path(
    post,
    path = "/api/v1/coupons",
    request_body = CreateCoupon,
    responses(
        (status = 201, description = "Coupon created", body = coupon::Model),
        (status = 400, description = "Invalid coupon", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already used by a coupon or gift card", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "promotions"
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateCoupon>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let coupon = state
        .services
        .promotions
        .create_coupon(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(coupon))
}
