use crate::api::ErrorResponse;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use showroom::auth::AuthError;
use showroom::documents::RepositoryError;
use tracing::error;

/// Errors surfaced to HTTP clients as `{ "error": ... }` bodies.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::Unauthorized(msg) => {
                return (
                    status,
                    [(header::WWW_AUTHENTICATE, "Basic realm=\"Showroom\"")],
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response();
            }
            ApiError::Forbidden => "Not authorized to modify this dealer".to_string(),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Server error".to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::DealerNotFound => ApiError::NotFound(err.to_string()),
            AuthError::DealerAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::WeakPassword | AuthError::InvalidProfile(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::StorageError(_)
            | AuthError::SerializationError(_)
            | AuthError::PasswordHashError(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_mapping() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::DealerAlreadyExists).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AuthError::WeakPassword).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::StorageError("disk".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized("Invalid credentials".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
