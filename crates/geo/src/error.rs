//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude non-finite or out of range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Search radius not a positive, finite number of kilometers
    #[error("Invalid radius: {0} (must be greater than 0 km)")]
    InvalidRadius(f64),

    /// Result limit not a positive integer
    #[error("Invalid limit: {0} (must be a positive integer)")]
    InvalidLimit(String),
}

/// Error code for integration with relief-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid search radius
    InvalidRadius = 10002,
    /// Invalid result limit
    InvalidLimit = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidRadius(_) => GeoErrorCode::InvalidRadius,
            GeoError::InvalidLimit(_) => GeoErrorCode::InvalidLimit,
        }
    }

    /// Whether the caller supplied bad input (a 400-class outcome).
    ///
    /// Every geo error is currently a client error; the method exists so
    /// callers do not have to match on variants.
    pub fn is_client_error(&self) -> bool {
        true
    }
}
