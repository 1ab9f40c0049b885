//! Error types for edviron-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edviron_core::CoreError;
use thiserror::Error;

/// Failure of a JSON endpoint
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(error) => {
                StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::Core(error) => error.code().to_string(),
            ApiError::BadRequest { .. } => "BAD_REQUEST".to_string(),
            ApiError::InternalError => "INTERNAL_ERROR".to_string(),
        }
    }

    fn body(&self) -> serde_json::Value {
        let (message, details) = match self {
            ApiError::Core(error) => {
                let report = error.report();
                let details = serde_json::json!({
                    "backend_status": report.backend_status,
                    "hint": report.hint,
                });
                (report.message, details)
            }
            other => (other.to_string(), serde_json::Value::Null),
        };

        serde_json::json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": message,
                "details": details,
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{} {}", status, self);
        } else {
            log::warn!("{} {}", status, self);
        }
        (status, axum::Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_core_error() {
        let error = ApiError::from(CoreError::validation("bad id"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "VALIDATION_ERROR");

        let error = ApiError::from(CoreError::Unauthorized);
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);

        let error = ApiError::from(CoreError::Transport {
            message: "refused".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_body_shape() {
        let body = ApiError::from(CoreError::validation("bad id")).body();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "bad id");
    }
}
