//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::{Coordinate, Result};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers,
/// validating both first.
///
/// # Errors
/// Returns [`GeoError::InvalidCoordinate`](crate::GeoError::InvalidCoordinate)
/// if either coordinate is non-finite or out of range.
///
/// # Example
/// ```
/// use relief_geo::{distance, Coordinate};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let east = Coordinate::new(0.0, 1.0);
///
/// let km = distance(&origin, &east).unwrap();
/// assert!((km - 111.19).abs() < 0.01);
///
/// assert!(distance(&Coordinate::new(95.0, 0.0), &origin).is_err());
/// ```
pub fn distance(from: &Coordinate, to: &Coordinate) -> Result<f64> {
    from.validate()?;
    to.validate()?;
    Ok(haversine_distance(from, to))
}

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// No validation is performed; callers must have checked both coordinates.
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push sqrt(h) just past 1 for antipodal points.
    2.0 * radius * h.sqrt().min(1.0).asin()
}
