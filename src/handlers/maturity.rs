use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{
        created_response, ensure_moderator, ensure_owner_or_moderator, map_service_error,
        no_content_response, success_response, validate_input,
    },
    services::maturity::{
        CreateMaturityScore, DimensionAverages, MaturityEvolution, MaturityGlobalStats,
        MaturityScoreView, PatchMaturityScore,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/maturity-scores", get(list_scores).post(create_score))
        .route("/maturity-scores/stats", get(global_stats))
        .route(
            "/maturity-scores/:id",
            get(get_score).patch(update_score).delete(delete_score),
        )
        .route("/maturity-scores/user/:user_id", get(user_scores))
        .route("/maturity-scores/user/:user_id/latest", get(latest_user_score))
        .route("/maturity-scores/user/:user_id/average", get(user_average))
        .route("/maturity-scores/user/:user_id/evolution", get(user_evolution))
}

/// Record a maturity snapshot
#[utoipa::path(
    post,
    path = "/api/v1/maturity-scores",
    request_body = CreateMaturityScore,
    responses(
        (status = 201, description = "Score recorded", body = MaturityScoreView),
        (status = 400, description = "Score outside 0..=100", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn create_score(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMaturityScore>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    ensure_owner_or_moderator(&user, payload.user_id)?;
    let score = state
        .services
        .maturity
        .create(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(score))
}

#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores",
    responses(
        (status = 200, description = "All scores, newest first", body = [MaturityScoreView]),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn list_scores(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    ensure_moderator(&user)?;
    let scores = state
        .services
        .maturity
        .list_all()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(scores))
}

/// Distinct users and platform-wide averages
#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/stats",
    responses(
        (status = 200, description = "Global statistics", body = MaturityGlobalStats),
        (status = 403, description = "Moderator role required", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn global_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    ensure_moderator(&user)?;
    let stats = state
        .services
        .maturity
        .global_stats()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    responses(
        (status = 200, description = "Score returned", body = MaturityScoreView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn get_score(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let score = state
        .services
        .maturity
        .get(id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, score.score.user_id)?;
    Ok(success_response(score))
}

#[utoipa::path(
    patch,
    path = "/api/v1/maturity-scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    request_body = PatchMaturityScore,
    responses(
        (status = 200, description = "Score updated", body = MaturityScoreView),
        (status = 400, description = "Score outside 0..=100", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn update_score(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchMaturityScore>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let current = state
        .services
        .maturity
        .get(id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, current.score.user_id)?;
    let score = state
        .services
        .maturity
        .update(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(score))
}

#[utoipa::path(
    delete,
    path = "/api/v1/maturity-scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn delete_score(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let current = state
        .services
        .maturity
        .get(id)
        .await
        .map_err(map_service_error)?;
    ensure_owner_or_moderator(&user, current.score.user_id)?;
    state
        .services
        .maturity
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

/// A user's score history, newest first
#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Score history", body = [MaturityScoreView])),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn user_scores(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner_or_moderator(&user, user_id)?;
    let scores = state
        .services
        .maturity
        .by_user(user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(scores))
}

/// Latest snapshot, or `null` when the user has none
#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/user/{user_id}/latest",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Latest score or null", body = Option<MaturityScoreView>)),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn latest_user_score(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner_or_moderator(&user, user_id)?;
    let latest = state
        .services
        .maturity
        .latest_by_user(user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(latest))
}

#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/user/{user_id}/average",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Rounded averages; zeros when empty", body = DimensionAverages)),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn user_average(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner_or_moderator(&user, user_id)?;
    let average = state
        .services
        .maturity
        .average_by_user(user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(average))
}

/// History plus the trend between the two newest snapshots
#[utoipa::path(
    get,
    path = "/api/v1/maturity-scores/user/{user_id}/evolution",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "History with trends", body = MaturityEvolution)),
    security(("bearer_auth" = [])),
    tag = "maturity"
)]
pub async fn user_evolution(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner_or_moderator(&user, user_id)?;
    let evolution = state
        .services
        .maturity
        .evolution_by_user(user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(evolution))
}
