//! Parsing raw query parameters
//!
//! Query strings and command-line flags arrive as text. These helpers turn
//! them into typed values and report malformed input as client errors rather
//! than falling back to a default.

use crate::error::{Error, ErrorCode, Result};
use relief_geo::{Coordinate, GeoError};

/// Parses an optional origin from separate latitude and longitude values.
///
/// Both absent yields `None`; only one present is an error.
///
/// # Example
/// ```
/// use relief_core::params::parse_origin;
///
/// let origin = parse_origin(Some("6.9271"), Some("79.8612")).unwrap().unwrap();
/// assert_eq!(origin.latitude, 6.9271);
///
/// assert!(parse_origin(None, None).unwrap().is_none());
/// assert!(parse_origin(Some("6.9"), None).is_err());
/// ```
pub fn parse_origin(lat: Option<&str>, lng: Option<&str>) -> Result<Option<Coordinate>> {
    match (blank_to_none(lat), blank_to_none(lng)) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let latitude = parse_component("lat", lat)?;
            let longitude = parse_component("lng", lng)?;
            Ok(Some(Coordinate::try_new(latitude, longitude)?))
        }
        (Some(_), None) => Err(Error::from(GeoError::InvalidCoordinate(
            "longitude is required when latitude is given".to_string(),
        ))
        .with_field("lng")),
        (None, Some(_)) => Err(Error::from(GeoError::InvalidCoordinate(
            "latitude is required when longitude is given".to_string(),
        ))
        .with_field("lat")),
    }
}

/// Parses a required origin.
pub fn require_origin(lat: Option<&str>, lng: Option<&str>) -> Result<Coordinate> {
    parse_origin(lat, lng)?.ok_or_else(|| {
        Error::from(GeoError::InvalidCoordinate(
            "latitude and longitude are required".to_string(),
        ))
    })
}

/// Parses an optional radius in kilometers. Non-numbers are
/// `InvalidRadius`; range checks happen in the query.
pub fn parse_radius(raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = blank_to_none(raw) else {
        return Ok(None);
    };
    raw.parse::<f64>().map(Some).map_err(|_| {
        Error::new(ErrorCode::InvalidRadius, format!("Invalid radius: '{}' is not a number", raw))
            .with_field("radius")
            .with_suggestion("Use a radius in kilometers, e.g. 25")
    })
}

/// Parses an optional result limit. Fractions and non-numbers are
/// `InvalidLimit`; range checks happen in the query.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<i64>> {
    let Some(raw) = blank_to_none(raw) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| Error::from(GeoError::InvalidLimit(raw.to_string())).with_field("limit"))
}

fn parse_component(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        Error::from(GeoError::InvalidCoordinate(format!("'{}' is not a number", raw))).with_field(field)
    })
}

fn blank_to_none(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
