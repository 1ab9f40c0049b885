//! Error types for edviron-core
//!
//! A [`CoreError`] is either rejected input, a rejected session or a failed
//! conversation with the payments backend. Pages show [`CoreError::user_message`]
//! when there is one; JSON endpoints serialize an [`ErrorReport`].

use edviron_config::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Unauthorized,
    NotFound,
    BackendError,
    TransportError,
    InvalidResponse,
    ConfigError,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::TransportError => "TRANSPORT_ERROR",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any request was made; the message is shown as is
    #[error("{message}")]
    Validation { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Non-success reply; `message` is whatever the backend said
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Backend unreachable: {message}")]
    Transport { message: String },

    #[error("Invalid backend response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation { message: message.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::Unauthorized => ErrorCode::Unauthorized,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::Backend { .. } => ErrorCode::BackendError,
            CoreError::Transport { .. } => ErrorCode::TransportError,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::Config { .. } => ErrorCode::ConfigError,
            CoreError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// HTTP status an API surface should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::Validation { .. } => 400,
            CoreError::Unauthorized => 401,
            CoreError::NotFound { .. } => 404,
            CoreError::Backend { status, .. } if (400..500).contains(status) => *status,
            CoreError::Backend { .. } | CoreError::Transport { .. } | CoreError::InvalidResponse { .. } => 502,
            CoreError::Config { .. } | CoreError::Internal { .. } => 500,
        }
    }

    /// The user did something wrong, as opposed to the backend or this server
    pub fn is_user_error(&self) -> bool {
        self.http_status() < 500
    }

    /// Message a user may see verbatim.
    ///
    /// Validation messages and backend-supplied messages qualify; anything
    /// else returns `None` so the caller can fall back to its own wording.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            CoreError::Validation { message } => Some(message),
            CoreError::Backend { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// What an operator could do about it
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CoreError::Unauthorized => Some("Log in again at /login."),
            CoreError::Transport { .. } => Some("Check that the backend is running and backend.base_url is correct."),
            CoreError::Config { .. } => Some("Run with --print-config to see a valid configuration."),
            _ => None,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
            backend_status: match self {
                CoreError::Backend { status, .. } => Some(*status),
                _ => None,
            },
            hint: self.hint(),
        }
    }
}

/// Serializable view of a [`CoreError`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        CoreError::Config {
            message: error.to_string(),
        }
    }
}

/// Which dashboard operation failed, and under which request id
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub operation: String,
    pub request_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// Sink for failed dashboard operations
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Logs through the `log` facade: user errors at warn, the rest at error
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let request = context.request_id.as_deref().unwrap_or("-");
        if error.is_user_error() {
            log::warn!(target: "edviron::error", "[{}] {} (op={}, req={})", error.code(), error, context.operation, request);
        } else {
            log::error!(
                target: "edviron::error",
                "[{}] {} (op={}, req={}){}",
                error.code(),
                error,
                context.operation,
                request,
                error.hint().map(|h| format!(" hint: {}", h)).unwrap_or_default()
            );
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(
            serde_json::to_value(ErrorCode::TransportError).unwrap(),
            serde_json::json!("TRANSPORT_ERROR")
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(CoreError::validation("bad").http_status(), 400);
        assert_eq!(CoreError::Unauthorized.http_status(), 401);
        assert_eq!(
            CoreError::Backend { status: 409, message: "dup".to_string() }.http_status(),
            409
        );
        assert_eq!(
            CoreError::Backend { status: 503, message: String::new() }.http_status(),
            502
        );
        assert_eq!(CoreError::Transport { message: "refused".to_string() }.http_status(), 502);
        assert!(CoreError::validation("bad").is_user_error());
        assert!(!CoreError::Config { message: "x".to_string() }.is_user_error());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(CoreError::validation("Please select a school.").user_message(), Some("Please select a school."));
        assert_eq!(
            CoreError::Backend { status: 400, message: "Email already exists".to_string() }.user_message(),
            Some("Email already exists")
        );
        assert_eq!(CoreError::Backend { status: 500, message: "  ".to_string() }.user_message(), None);
        assert_eq!(CoreError::Transport { message: "timeout".to_string() }.user_message(), None);
    }

    #[test]
    fn test_report() {
        let report = CoreError::Backend { status: 500, message: "boom".to_string() }.report();
        assert_eq!(report.code, ErrorCode::BackendError);
        assert_eq!(report.backend_status, Some(500));
        assert!(report.hint.is_none());

        let report = CoreError::Transport { message: "refused".to_string() }.report();
        assert!(report.hint.is_some());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("backend_status").is_none());
    }

    #[test]
    fn test_from_config_error() {
        let error: CoreError = ConfigError::InvalidYaml {
            reason: "bad indent".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("list_transactions").with_request_id("req-123".to_string());
        assert_eq!(context.operation, "list_transactions");
        assert_eq!(context.request_id.as_deref(), Some("req-123"));
    }
}
