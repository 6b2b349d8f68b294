//! Error handling with codes and recovery suggestions
//!
//! Every failure carries an [`ErrorCode`] so the request layer can decide
//! between a client-input outcome (bad coordinate, radius, limit or field),
//! a missing record, and a store failure.

use relief_geo::{GeoError, GeoErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unexpected failure outside the store
    Internal = 1001,

    // Configuration errors (3xxx)
    /// Config file could not be read
    ConfigError = 3000,
    /// Config file is not valid TOML for the schema
    ConfigParseError = 3002,
    /// Config values are out of range
    ConfigValidationError = 3003,

    // Validation errors (6xxx)
    /// A request field failed validation
    ValidationError = 6000,
    /// Latitude or longitude out of range, or only one of them given
    InvalidCoordinate = 6101,
    /// Radius missing a positive finite value
    InvalidRadius = 6102,
    /// Limit is not a positive whole number
    InvalidLimit = 6103,

    // Lookup errors (7xxx)
    /// No center with the requested id
    CenterNotFound = 7001,

    // Store errors (9xxx)
    /// The center store could not be read or written
    UpstreamFetchFailure = 9001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            3 => "Configuration",
            6 => "Validation",
            7 => "Lookup",
            9 => "Store",
            _ => "Unknown",
        }
    }

    /// Whether the caller can fix the failure by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self.code() / 1000, 6 | 7)
    }

    /// Whether the failure comes from the configuration file.
    pub fn is_config_error(&self) -> bool {
        self.code() / 1000 == 3
    }

    /// HTTP-equivalent status for the request layer.
    pub fn status_code(&self) -> u16 {
        match self.code() / 1000 {
            6 => 400,
            7 => 404,
            _ => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<GeoErrorCode> for ErrorCode {
    fn from(code: GeoErrorCode) -> Self {
        match code {
            GeoErrorCode::InvalidCoordinate => ErrorCode::InvalidCoordinate,
            GeoErrorCode::InvalidRadius => ErrorCode::InvalidRadius,
            GeoErrorCode::InvalidLimit => ErrorCode::InvalidLimit,
        }
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Field of the request the error refers to
    pub field: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.code)?;
        if let Some(field) = &self.field {
            write!(f, "{}: ", field)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            suggestion: None,
            source: None,
        }
    }

    /// Attach the request field the error refers to
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the caller can fix the failure by changing the request.
    pub fn is_client_error(&self) -> bool {
        self.code.is_client_error()
    }

    /// Whether the failure comes from the configuration file.
    pub fn is_config_error(&self) -> bool {
        self.code.is_config_error()
    }

    /// HTTP-equivalent status for the request layer.
    pub fn status_code(&self) -> u16 {
        self.code.status_code()
    }

    // Convenience constructors

    /// Unexpected failure outside the store
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Config file could not be read
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// No center with `id`
    pub fn not_found(id: i64) -> Self {
        Self::new(ErrorCode::CenterNotFound, format!("Disaster center {} not found", id))
    }

    /// The center store failed
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFetchFailure, message)
            .with_suggestion("Check that the center store is reachable and try again")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Store or internal failure
    pub const FAILURE: i32 = 1;
    /// Bad request input
    pub const INVALID_INPUT: i32 = 2;
    /// Unreadable or invalid configuration
    pub const CONFIG_ERROR: i32 = 3;
    /// Requested center does not exist
    pub const NOT_FOUND: i32 = 4;
}

impl Error {
    /// Exit code a CLI should return for this error
    pub fn exit_code(&self) -> i32 {
        match self.code.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            6 => exit_codes::INVALID_INPUT,
            7 => exit_codes::NOT_FOUND,
            _ => exit_codes::FAILURE,
        }
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        let suggestion = match &err {
            GeoError::InvalidCoordinate(_) => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            GeoError::InvalidRadius(_) => "Use a radius greater than 0 km",
            GeoError::InvalidLimit(_) => "Use a whole number of results greater than 0",
        };
        Error::new(err.code().into(), err.to_string()).with_suggestion(suggestion)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ConfigError.to_string(), "E3000");
        assert_eq!(ErrorCode::InvalidRadius.to_string(), "E6102");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidLimit.category(), "Validation");
        assert_eq!(ErrorCode::UpstreamFetchFailure.category(), "Store");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorCode::InvalidCoordinate.status_code(), 400);
        assert_eq!(ErrorCode::CenterNotFound.status_code(), 404);
        assert_eq!(ErrorCode::UpstreamFetchFailure.status_code(), 500);
        assert!(!ErrorCode::UpstreamFetchFailure.is_client_error());
    }

    #[test]
    fn test_from_geo_error() {
        let err: Error = GeoError::InvalidRadius(0.0).into();
        assert_eq!(err.code, ErrorCode::InvalidRadius);
        assert!(err.is_client_error());
        assert!(err.suggestion.is_some());
        assert_eq!(err.exit_code(), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_display_includes_field() {
        let err = Error::new(ErrorCode::ValidationError, "must not be blank").with_field("name");
        assert_eq!(err.to_string(), "[E6000] name: must not be blank");
    }

    #[test]
    fn test_config_errors_exit_with_config_code() {
        let err = Error::config("Failed to read config file missing.toml");
        assert!(err.is_config_error());
        assert!(!err.is_client_error());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
        assert!(!Error::upstream("down").is_config_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::UpstreamFetchFailure).unwrap();
        assert_eq!(json, "\"UPSTREAM_FETCH_FAILURE\"");
    }
}
