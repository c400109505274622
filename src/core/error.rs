//! Typed error handling for the service
//!
//! Three small error enums, one per concern:
//!
//! - [`QueryError`]: request-shape errors raised while resolving a graph
//!   query. These are always local to one field and are surfaced in the
//!   response `errors` list without aborting sibling resolution.
//! - [`RequestError`]: malformed REST requests, rendered as an HTTP error
//!   response.
//! - [`ConfigError`]: startup configuration failures.
//!
//! A missing root entity is never an error: it resolves to an explicit null.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while resolving a graph query
///
/// Every variant is attributable to the caller's request shape. The executor
/// records these per field path; one bad field never prevents the rest of a
/// valid query from resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The requested root operation is not declared in the schema
    UnknownOperation { operation: String },

    /// The requested field is not declared on the entity type
    UnknownField {
        entity_type: &'static str,
        field: String,
    },

    /// A required argument was not supplied
    MissingArgument {
        operation: String,
        argument: &'static str,
    },

    /// An argument value does not match its declared scalar type
    InvalidArgumentType {
        operation: String,
        argument: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownOperation { operation } => {
                write!(f, "Unknown operation: {}", operation)
            }
            QueryError::UnknownField { entity_type, field } => {
                write!(f, "Unknown field '{}' on type '{}'", field, entity_type)
            }
            QueryError::MissingArgument {
                operation,
                argument,
            } => {
                write!(
                    f,
                    "Missing required argument '{}' for operation '{}'",
                    argument, operation
                )
            }
            QueryError::InvalidArgumentType {
                operation,
                argument,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for argument '{}' of operation '{}': expected {}",
                    argument, operation, expected
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            QueryError::UnknownField { .. } => "UNKNOWN_FIELD",
            QueryError::MissingArgument { .. } => "MISSING_ARGUMENT",
            QueryError::InvalidArgumentType { .. } => "INVALID_ARGUMENT_TYPE",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to malformed REST requests
#[derive(Debug)]
pub enum RequestError {
    /// Path id segment is not a valid integer
    InvalidEntityId { id: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidEntityId { id } => {
                write!(f, "Invalid entity ID format: '{}'", id)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to startup configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Bind address is not a valid `host:port` pair
    InvalidBindAddr { value: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBindAddr { value, message } => {
                write!(f, "Invalid bind address '{}': {}", value, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_display_names_field_and_type() {
        let err = QueryError::UnknownField {
            entity_type: "User",
            field: "nickname".to_string(),
        };
        assert!(err.to_string().contains("nickname"));
        assert!(err.to_string().contains("User"));
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn test_unknown_operation_display() {
        let err = QueryError::UnknownOperation {
            operation: "account".to_string(),
        };
        assert!(err.to_string().contains("account"));
        assert_eq!(err.error_code(), "UNKNOWN_OPERATION");
    }

    #[test]
    fn test_invalid_argument_type_names_expected_type() {
        let err = QueryError::InvalidArgumentType {
            operation: "user".to_string(),
            argument: "id",
            expected: "Int",
        };
        assert!(err.to_string().contains("Int"));
        assert_eq!(err.error_code(), "INVALID_ARGUMENT_TYPE");
    }

    #[test]
    fn test_request_error_status_code() {
        let err = RequestError::InvalidEntityId {
            id: "abc".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_ENTITY_ID");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = RequestError::InvalidEntityId {
            id: "abc".to_string(),
        };
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_ENTITY_ID");
        assert!(response.message.contains("abc"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidBindAddr {
            value: "nonsense".to_string(),
            message: "invalid socket address syntax".to_string(),
        };
        assert!(err.to_string().contains("nonsense"));
    }
}
