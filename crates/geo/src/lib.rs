//! Geospatial query core for relief centers.
//!
//! This crate provides:
//! - Haversine distance calculations with coordinate validation
//! - Bounding boxes for store-side pre-filtering
//! - Radius filtering and nearest-K selection over center snapshots
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use relief_geo::{distance, Coordinate};
//!
//! let colombo = Coordinate::new(6.9271, 79.8612);
//! let kandy = Coordinate::new(7.2906, 80.6337);
//!
//! let distance_km = distance(&colombo, &kandy).unwrap();
//! assert!((distance_km - 94.0).abs() < 5.0);
//! ```

mod bbox;
mod center;
mod error;
mod haversine;
pub mod proximity;

#[cfg(feature = "wasm")]
mod wasm;

pub use bbox::BoundingBox;
pub use center::{Center, DistancedCenter};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use proximity::{filter_by_radius, nearest, nearest_default, DEFAULT_NEAREST_LIMIT};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without validating it.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range components.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the coordinate, naming the offending component on failure.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
