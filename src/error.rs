//! This module defines all error types used throughout the crate.
//!
//! "Nothing found" is never an error here: searches return empty sets or `None`.

use std::io;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Graph ingestion errors
    #[error("Parse error in {source_name} (line {line}): {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    /// Malformed input reaching the core (empty label list, broken path, unknown state)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Input too large for an exponential enumeration
    #[error("Resource limit exceeded: {what} is {size}, limit is {limit}")]
    ResourceLimitExceeded {
        what: &'static str,
        size: usize,
        limit: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a contract violation error
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Create a parse error for a named input
    pub fn parse(source_name: impl Into<String>, line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line,
            message: msg.into(),
        }
    }

    /// Create a resource limit error
    pub fn resource_limit(what: &'static str, size: usize, limit: usize) -> Self {
        Self::ResourceLimitExceeded { what, size, limit }
    }

    /// Check if error is a resource limit rejection
    pub fn is_resource_limit(&self) -> bool {
        matches!(self, Error::ResourceLimitExceeded { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Custom(format!("JSON error: {}", err))
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::contract("transition has no labels");
        assert_eq!(
            err.to_string(),
            "Contract violation: transition has no labels"
        );

        let err = Error::parse("model.dot", 3, "bad line");
        assert_eq!(err.to_string(), "Parse error in model.dot (line 3): bad line");
    }

    #[test]
    fn test_resource_limit() {
        let err = Error::resource_limit("path length", 25, 20);
        assert!(err.is_resource_limit());
        assert_eq!(
            err.to_string(),
            "Resource limit exceeded: path length is 25, limit is 20"
        );

        let err = Error::custom("other");
        assert!(!err.is_resource_limit());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: usize) -> Result<()> {
            crate::ensure!(value < 3, "value {} too large", value);
            Ok(())
        }

        assert!(check(1).is_ok());
        assert_eq!(check(5).unwrap_err().to_string(), "value 5 too large");
    }
}
