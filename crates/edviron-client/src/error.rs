//! Error types for edviron-client

use edviron_core::CoreError;
use thiserror::Error;

/// Failure of a single backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Bad request: {message}")]
    BadRequest { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Failed to parse response: {0}")]
    DeserializationError(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl From<ClientError> for CoreError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::BadRequest { status, message } => CoreError::Backend { status, message },
            ClientError::Unauthorized(_) => CoreError::Unauthorized,
            ClientError::NotFound(message) => CoreError::NotFound { resource: message },
            ClientError::ServerError(status, message) | ClientError::HttpError(status, message) => {
                CoreError::Backend { status, message }
            }
            ClientError::RequestError(message) => CoreError::Transport { message },
            ClientError::DeserializationError(message) => CoreError::InvalidResponse { message },
            ClientError::InvalidHeader(message) => CoreError::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core_error() {
        let core: CoreError = ClientError::BadRequest {
            status: 400,
            message: "Email already exists".to_string(),
        }
        .into();
        assert_eq!(core.user_message(), Some("Email already exists"));

        let core: CoreError = ClientError::Unauthorized("expired".to_string()).into();
        assert!(matches!(core, CoreError::Unauthorized));

        let core: CoreError = ClientError::RequestError("connection refused".to_string()).into();
        assert_eq!(core.http_status(), 502);

        let core: CoreError = ClientError::ServerError(503, "down".to_string()).into();
        assert!(matches!(core, CoreError::Backend { status: 503, .. }));
    }
}
