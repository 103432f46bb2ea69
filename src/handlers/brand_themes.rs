use crate::{
    auth::AuthUser,
    entities::brand_theme,
    errors::ApiError,
    handlers::common::{
        created_response, ensure_moderator, ensure_owner_or_moderator, map_service_error,
        no_content_response, success_response, validate_input,
    },
    services::brand_themes::{BrandThemeFilter, CreateBrandTheme, PatchBrandTheme},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Owned themes are changed by their owner or a moderator; shared themes by moderators.
async fn ensure_theme_editor(state: &AppState, user: &AuthUser, id: Uuid) -> Result<(), ApiError> {
    let theme = state
        .services
        .brand_themes
        .get(id)
        .await
        .map_err(map_service_error)?;
    match theme.user_id {
        Some(owner) => ensure_owner_or_moderator(user, owner),
        None => ensure_moderator(user),
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/brand-themes", get(list_brand_themes).post(create_brand_theme))
        .route(
            "/brand-themes/by-theme-id/:theme_id",
            get(get_brand_theme_by_theme_id),
        )
        .route(
            "/brand-themes/:id",
            get(get_brand_theme)
                .patch(update_brand_theme)
                .delete(delete_brand_theme),
        )
        .route("/brand-themes/:id/activate", post(activate_brand_theme))
}

/// Create a brand theme
#[utoipa::path(
    post,
    path = "/api/v1/brand-themes",
    request_body = CreateBrandTheme,
    responses(
        (status = 201, description = "Brand theme created", body = brand_theme::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "theme_id already exists", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn create_brand_theme(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBrandTheme>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    if let Some(owner) = payload.user_id {
        ensure_owner_or_moderator(&user, owner)?;
    }
    let theme = state
        .services
        .brand_themes
        .create(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(theme))
}

/// List brand themes, newest first
#[utoipa::path(
    get,
    path = "/api/v1/brand-themes",
    params(BrandThemeFilter),
    responses(
        (status = 200, description = "Brand themes returned", body = [brand_theme::Model]),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn list_brand_themes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<BrandThemeFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let themes = state
        .services
        .brand_themes
        .list(filter)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(themes))
}

#[utoipa::path(
    get,
    path = "/api/v1/brand-themes/{id}",
    params(("id" = Uuid, Path, description = "Brand theme ID")),
    responses(
        (status = 200, description = "Brand theme returned", body = brand_theme::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn get_brand_theme(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let theme = state
        .services
        .brand_themes
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(theme))
}

#[utoipa::path(
    get,
    path = "/api/v1/brand-themes/by-theme-id/{theme_id}",
    params(("theme_id" = String, Path, description = "Public theme identifier")),
    responses(
        (status = 200, description = "Brand theme returned", body = brand_theme::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn get_brand_theme_by_theme_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(theme_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let theme = state
        .services
        .brand_themes
        .get_by_theme_id(&theme_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(theme))
}

/// Partially update a brand theme; bumps its version
#[utoipa::path(
    patch,
    path = "/api/v1/brand-themes/{id}",
    params(("id" = Uuid, Path, description = "Brand theme ID")),
    request_body = PatchBrandTheme,
    responses(
        (status = 200, description = "Brand theme updated", body = brand_theme::Model),
        (status = 403, description = "Theme belongs to another user", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "theme_id taken by another theme", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn update_brand_theme(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchBrandTheme>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    ensure_theme_editor(&state, &user, id).await?;
    if let Some(new_owner) = payload.user_id {
        ensure_owner_or_moderator(&user, new_owner)?;
    }
    let theme = state
        .services
        .brand_themes
        .update(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(theme))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brand-themes/{id}",
    params(("id" = Uuid, Path, description = "Brand theme ID")),
    responses(
        (status = 204, description = "Brand theme deleted"),
        (status = 403, description = "Theme belongs to another user", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn delete_brand_theme(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_theme_editor(&state, &user, id).await?;
    state
        .services
        .brand_themes
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

/// Activate a theme and deactivate the owner's other themes
#[utoipa::path(
    post,
    path = "/api/v1/brand-themes/{id}/activate",
    params(("id" = Uuid, Path, description = "Brand theme ID")),
    responses(
        (status = 200, description = "Brand theme activated", body = brand_theme::Model),
        (status = 403, description = "Theme belongs to another user", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "brand-themes"
)]
pub async fn activate_brand_theme(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_theme_editor(&state, &user, id).await?;
    let theme = state
        .services
        .brand_themes
        .activate(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(theme))
}
