use crate::auth::AuthUser;
use crate::errors::{ApiError, ServiceError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::ApiResponse;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::success(data))).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// The caller's subject as a UUID, required where the caller is recorded as an actor
pub fn caller_id(user: &AuthUser) -> Result<Uuid, ApiError> {
    user.user_uuid().ok_or_else(|| {
        ApiError::ServiceError(ServiceError::Unauthorized(
            "token subject is not a user id".to_string(),
        ))
    })
}

/// Owners act on their own records; moderators and admins act on any
pub fn ensure_owner_or_moderator(user: &AuthUser, owner_id: Uuid) -> Result<(), ApiError> {
    if user.is_moderator() || user.user_uuid() == Some(owner_id) {
        Ok(())
    } else {
        Err(ApiError::ServiceError(ServiceError::Forbidden(
            "resource belongs to another user".to_string(),
        )))
    }
}

pub fn ensure_moderator(user: &AuthUser) -> Result<(), ApiError> {
    if user.is_moderator() {
        Ok(())
    } else {
        Err(ApiError::ServiceError(ServiceError::Forbidden(
            "moderator role required".to_string(),
        )))
    }
}

/// Pagination parameters for list operations
#[derive(Debug, Clone, Copy, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    pub limit: Option<u64>,
}

fn default_page() -> u64 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: None,
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }
}

pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if total == 0 || per_page == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let params = PaginationParams {
            page: 0,
            limit: None,
        };
        assert_eq!(params.page(), 1);
    }
}
