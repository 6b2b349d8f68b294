//! Input validation for center records
//!
//! Collects every problem with a request instead of stopping at the first,
//! so a client can fix all fields in one round trip.
//!
//! # Example
//!
//! ```rust
//! use relief_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Town Hall")
//!     .required("address", "")
//!     .latitude("latitude", 95.0)
//!     .validate();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors().len(), 2);
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Convert to Result type
    ///
    /// Coordinate problems take precedence and yield
    /// [`ErrorCode::InvalidCoordinate`]; anything else is a plain
    /// [`ErrorCode::ValidationError`].
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }

        let code = if self.errors.iter().any(|e| e.code == COORDINATE) {
            ErrorCode::InvalidCoordinate
        } else {
            ErrorCode::ValidationError
        };
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        let mut err = Error::new(code, format!("Validation failed: {}", messages.join("; ")));
        if let [only] = self.errors.as_slice() {
            err = err.with_field(only.field.clone());
        }
        Err(err)
    }
}

const COORDINATE: &str = "COORDINATE";

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn error(mut self, field: &str, message: String, code: &str, actual: Option<String>) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            actual,
        });
        self
    }

    /// Validate that a field is not blank
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.error(field, "Field is required".to_string(), "REQUIRED", None);
        }
        self
    }

    /// Validate maximum length in characters
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            return self.error(
                field,
                format!("Must be at most {} characters", max),
                "MAX_LENGTH",
                Some(format!("{} chars", len)),
            );
        }
        self
    }

    /// Validate a latitude in degrees
    pub fn latitude(self, field: &str, value: f64) -> Self {
        if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
            return self.error(
                field,
                "Must be a number between -90 and 90".to_string(),
                COORDINATE,
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate a longitude in degrees
    pub fn longitude(self, field: &str, value: f64) -> Self {
        if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
            return self.error(
                field,
                "Must be a number between -180 and 180".to_string(),
                COORDINATE,
                Some(value.to_string()),
            );
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
