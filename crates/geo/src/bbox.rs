//! Bounding boxes around a query circle.
//!
//! A store can use [`BoundingBox`] as a cheap pre-filter before the exact
//! haversine pass. The box always contains the whole circle, so pre-filtering
//! never drops a center that the radius filter would keep.

use crate::{Coordinate, GeoError, Result, EARTH_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Padding applied to the angular radius (relative, absolute radians).
const PADDING: (f64, f64) = (1e-9, 1e-12);

/// A latitude/longitude rectangle in degrees.
///
/// When the box crosses the antimeridian, `min_lng > max_lng` and the box
/// covers `[min_lng, 180] ∪ [-180, max_lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Computes the smallest lat/lng box containing every point within
    /// `radius_km` of `origin`.
    ///
    /// # Example
    /// ```
    /// use relief_geo::{BoundingBox, Coordinate};
    ///
    /// let bbox = BoundingBox::around(&Coordinate::new(0.0, 0.0), 111.2).unwrap();
    /// assert!(bbox.contains(&Coordinate::new(0.0, 1.0)));
    /// assert!(!bbox.contains(&Coordinate::new(0.0, 1.1)));
    /// ```
    pub fn around(origin: &Coordinate, radius_km: f64) -> Result<Self> {
        origin.validate()?;
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(GeoError::InvalidRadius(radius_km));
        }

        let angular = radius_km / EARTH_RADIUS_KM * (1.0 + PADDING.0) + PADDING.1;
        if angular >= PI {
            return Ok(Self::world());
        }

        let (lat, lng) = origin.to_radians();
        let min_lat = lat - angular;
        let max_lat = lat + angular;

        // Circle reaches a pole: every longitude is in range.
        if min_lat <= -FRAC_PI_2 || max_lat >= FRAC_PI_2 {
            return Ok(Self {
                min_lat: if min_lat <= -FRAC_PI_2 { -90.0 } else { min_lat.to_degrees() },
                max_lat: if max_lat >= FRAC_PI_2 { 90.0 } else { max_lat.to_degrees() },
                min_lng: -180.0,
                max_lng: 180.0,
            });
        }

        let d_lng = (angular.sin() / lat.cos()).min(1.0).asin();
        let mut min_lng = lng - d_lng;
        let mut max_lng = lng + d_lng;
        if min_lng < -PI {
            min_lng += 2.0 * PI;
        }
        if max_lng > PI {
            max_lng -= 2.0 * PI;
        }

        Ok(Self {
            min_lat: min_lat.to_degrees(),
            max_lat: max_lat.to_degrees(),
            min_lng: min_lng.to_degrees(),
            max_lng: max_lng.to_degrees(),
        })
    }

    /// The box covering the whole globe.
    pub fn world() -> Self {
        Self {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lng: -180.0,
            max_lng: 180.0,
        }
    }

    /// Returns true if the box wraps across the ±180° meridian.
    #[inline]
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lng > self.max_lng
    }

    /// Returns true if `coord` lies inside the box (edges included).
    pub fn contains(&self, coord: &Coordinate) -> bool {
        if coord.latitude < self.min_lat || coord.latitude > self.max_lat {
            return false;
        }
        if self.crosses_antimeridian() {
            coord.longitude >= self.min_lng || coord.longitude <= self.max_lng
        } else {
            coord.longitude >= self.min_lng && coord.longitude <= self.max_lng
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine_distance;
    use proptest::prelude::*;

    #[test]
    fn test_equator_box_is_symmetric() {
        let bbox = BoundingBox::around(&Coordinate::new(0.0, 0.0), 111.195).unwrap();
        assert!((bbox.max_lat - 1.0).abs() < 1e-3);
        assert!((bbox.min_lat + 1.0).abs() < 1e-3);
        assert!((bbox.max_lng - 1.0).abs() < 1e-3);
        assert!((bbox.min_lng + 1.0).abs() < 1e-3);
        assert!(!bbox.crosses_antimeridian());
    }

    #[test]
    fn test_box_widens_with_latitude() {
        let equator = BoundingBox::around(&Coordinate::new(0.0, 0.0), 100.0).unwrap();
        let north = BoundingBox::around(&Coordinate::new(60.0, 0.0), 100.0).unwrap();
        assert!(north.max_lng - north.min_lng > equator.max_lng - equator.min_lng);
    }

    #[test]
    fn test_antimeridian_wraps() {
        let fiji = Coordinate::new(-17.7, 179.9);
        let bbox = BoundingBox::around(&fiji, 50.0).unwrap();
        assert!(bbox.crosses_antimeridian());
        assert!(bbox.contains(&Coordinate::new(-17.7, -179.9)));
        assert!(bbox.contains(&Coordinate::new(-17.7, 179.8)));
        assert!(!bbox.contains(&Coordinate::new(-17.7, 0.0)));
    }

    #[test]
    fn test_polar_box_spans_all_longitudes() {
        let bbox = BoundingBox::around(&Coordinate::new(89.5, 10.0), 200.0).unwrap();
        assert_eq!(bbox.min_lng, -180.0);
        assert_eq!(bbox.max_lng, 180.0);
        assert_eq!(bbox.max_lat, 90.0);
    }

    #[test]
    fn test_huge_radius_is_world() {
        let bbox = BoundingBox::around(&Coordinate::new(10.0, 10.0), 30_000.0).unwrap();
        assert_eq!(bbox, BoundingBox::world());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            BoundingBox::around(&Coordinate::new(0.0, 0.0), 0.0),
            Err(GeoError::InvalidRadius(_))
        ));
        assert!(matches!(
            BoundingBox::around(&Coordinate::new(95.0, 0.0), 10.0),
            Err(GeoError::InvalidCoordinate(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_box_contains_circle(
            lat in -89.0f64..89.0,
            lng in -180.0f64..=180.0,
            plat in -90.0f64..=90.0,
            plng in -180.0f64..=180.0,
            radius in 0.1f64..5_000.0,
        ) {
            let origin = Coordinate::new(lat, lng);
            let point = Coordinate::new(plat, plng);
            let bbox = BoundingBox::around(&origin, radius).unwrap();
            if haversine_distance(&origin, &point) <= radius {
                prop_assert!(bbox.contains(&point), "{:?} not in {:?}", point, bbox);
            }
        }
    }
}
