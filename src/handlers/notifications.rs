use crate::{
    auth::AuthUser,
    entities::notification,
    errors::ApiError,
    handlers::common::{caller_id, map_service_error, success_response},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkRead {
    pub read: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", patch(mark_notification))
}

/// The caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications returned", body = [notification::Model]),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = caller_id(&user)?;
    let notifications = state
        .services
        .notifications
        .list_for_user(user_id, query.unread_only)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(notifications))
}

#[utoipa::path(
    patch,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    request_body = MarkRead,
    responses(
        (status = 200, description = "Notification updated", body = notification::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkRead>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = caller_id(&user)?;
    let updated = state
        .services
        .notifications
        .set_read(user_id, id, payload.read)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(updated))
}
