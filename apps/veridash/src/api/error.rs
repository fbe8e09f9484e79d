//! # API Errors
//!
//! Maps core errors onto HTTP status codes.

use super::types::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use veridash_core::VeridashError;

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    Core(VeridashError),
    /// The endpoint needs an authenticated session.
    Unauthenticated,
}

impl From<VeridashError> for ApiError {
    fn from(err: VeridashError) -> Self {
        Self::Core(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "Not logged in".to_string(),
            ),
            ApiError::Core(err) => {
                let (status, code) = match err {
                    VeridashError::InvalidRole(_) => (StatusCode::BAD_REQUEST, "invalid_role"),
                    VeridashError::AuthenticationFailed(_) => {
                        (StatusCode::UNAUTHORIZED, "authentication_failed")
                    }
                    VeridashError::ConcurrentLoginRejected => {
                        (StatusCode::CONFLICT, "login_in_progress")
                    }
                    VeridashError::AlreadyAuthenticated => {
                        (StatusCode::CONFLICT, "already_authenticated")
                    }
                    VeridashError::StaleCompletionDiscarded => {
                        (StatusCode::CONFLICT, "login_superseded")
                    }
                    VeridashError::NotificationNotFound(_) => {
                        (StatusCode::NOT_FOUND, "notification_not_found")
                    }
                    VeridashError::StorageError(_)
                    | VeridashError::SerializationError(_)
                    | VeridashError::ConfigError(_)
                    | VeridashError::IoError(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                (status, code, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, "{}", message);
        }
        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                error: message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (VeridashError::InvalidRole("x".into()), StatusCode::BAD_REQUEST),
            (VeridashError::AuthenticationFailed("x".into()), StatusCode::UNAUTHORIZED),
            (VeridashError::ConcurrentLoginRejected, StatusCode::CONFLICT),
            (VeridashError::StaleCompletionDiscarded, StatusCode::CONFLICT),
            (VeridashError::NotificationNotFound(9), StatusCode::NOT_FOUND),
            (VeridashError::StorageError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).parts().0, status);
        }
        assert_eq!(ApiError::Unauthenticated.parts().0, StatusCode::UNAUTHORIZED);
    }
}
