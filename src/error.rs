//! Error types for route table construction
//!
//! Navigation itself never fails: unknown paths and names resolve to an echo
//! route. Errors only surface while a route table is being built, either from
//! an invalid path pattern or from a malformed JSON table.

use std::fmt;

/// Errors that can occur while building a route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A route path pattern failed validation
    InvalidPath { path: String, reason: String },

    /// A JSON route table could not be parsed
    InvalidTable { message: String },
}

impl RouteError {
    /// Build an [`RouteError::InvalidPath`]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        RouteError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a path validation error
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, RouteError::InvalidPath { .. })
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidPath { path, reason } => {
                write!(f, "Invalid route path '{}': {}", path, reason)
            }
            RouteError::InvalidTable { message } => {
                write!(f, "Invalid route table: {}", message)
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::InvalidTable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let error = RouteError::invalid_path("/users//x", "consecutive slashes");
        assert_eq!(
            error.to_string(),
            "Invalid route path '/users//x': consecutive slashes"
        );
        assert!(error.is_invalid_path());
    }

    #[test]
    fn test_invalid_table_display() {
        let error = RouteError::InvalidTable {
            message: "expected value".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid route table: expected value");
        assert!(!error.is_invalid_path());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = RouteError::from(err);
        assert!(matches!(error, RouteError::InvalidTable { .. }));
    }
}
