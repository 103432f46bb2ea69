use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{map_service_error, success_response},
    services::shop_regions::{NormalizeRegionsRequest, RegionNormalizationSummary},
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use tracing::info;

/// Operator routes, moderators and admins only
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/shops/normalize-regions", post(normalize_shop_regions))
}

/// Parse free-text shop regions into department and municipality
///
/// Runs as a dry run unless `dry_run` is `false`.
#[utoipa::path(
    post,
    path = "/api/v1/admin/shops/normalize-regions",
    request_body = NormalizeRegionsRequest,
    responses(
        (status = 200, description = "Normalization summary", body = RegionNormalizationSummary),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn normalize_shop_regions(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Option<Json<NormalizeRegionsRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();
    info!(operator = %user.user_id, dry_run = request.dry_run, "region normalization requested");
    let summary = state
        .services
        .shop_regions
        .normalize_shop_regions(request)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(summary))
}
