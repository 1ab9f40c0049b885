//! Error types for edviron-config

use thiserror::Error;

/// Why a configuration could not be used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {reason}")]
    InvalidYaml { reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Dotted path of the offending field, when one is known
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_of_invalid_value() {
        let error = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            reason: "Port must be greater than 0".to_string(),
        };
        assert_eq!(error.field(), Some("server.port"));
        assert_eq!(
            error.to_string(),
            "Invalid field value: server.port - Port must be greater than 0"
        );
    }

    #[test]
    fn test_unreadable_keeps_source() {
        let error = ConfigError::Unreadable {
            path: "config.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.field().is_none());
        assert!(std::error::Error::source(&error).is_some());
    }
}
