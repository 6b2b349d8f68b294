//! Radius filtering and nearest-K selection over a candidate snapshot.
//!
//! Both operations borrow the snapshot, skip inactive centers, and return new
//! [`DistancedCenter`] values sorted by ascending distance. Centers at exactly
//! the same distance keep their relative order from the input.

use crate::{haversine_distance, Center, Coordinate, DistancedCenter, GeoError, Result};

/// Number of results `nearest` returns when the caller gives no limit.
pub const DEFAULT_NEAREST_LIMIT: i64 = 5;

/// Returns every active center within `radius_km` of `origin` (edge included),
/// closest first.
///
/// # Errors
/// * [`GeoError::InvalidRadius`] if `radius_km` is not a positive finite number
/// * [`GeoError::InvalidCoordinate`] if the origin, or any active candidate's
///   stored location, is invalid
///
/// # Example
/// ```
/// use relief_geo::{filter_by_radius, Coordinate};
///
/// let results = filter_by_radius(&Coordinate::new(0.0, 0.0), 50.0, &[]).unwrap();
/// assert!(results.is_empty());
/// ```
pub fn filter_by_radius(
    origin: &Coordinate,
    radius_km: f64,
    candidates: &[Center],
) -> Result<Vec<DistancedCenter>> {
    validate_radius(radius_km)?;
    origin.validate()?;

    let mut ranked = rank(origin, candidates)?;
    ranked.retain(|(distance, _)| *distance <= radius_km);

    Ok(annotate(ranked))
}

/// Returns the `limit` active centers closest to `origin`, closest first.
///
/// Fewer than `limit` entries come back when the snapshot holds fewer
/// active centers.
///
/// # Errors
/// * [`GeoError::InvalidLimit`] if `limit` is zero or negative
/// * [`GeoError::InvalidCoordinate`] if the origin, or any active candidate's
///   stored location, is invalid
pub fn nearest(origin: &Coordinate, limit: i64, candidates: &[Center]) -> Result<Vec<DistancedCenter>> {
    let limit = validate_limit(limit)?;
    origin.validate()?;

    let mut ranked = rank(origin, candidates)?;
    ranked.truncate(limit);

    Ok(annotate(ranked))
}

/// [`nearest`] with [`DEFAULT_NEAREST_LIMIT`].
pub fn nearest_default(origin: &Coordinate, candidates: &[Center]) -> Result<Vec<DistancedCenter>> {
    nearest(origin, DEFAULT_NEAREST_LIMIT, candidates)
}

/// Checks that a radius is a positive, finite number of kilometers.
pub fn validate_radius(radius_km: f64) -> Result<f64> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(GeoError::InvalidRadius(radius_km))
    }
}

/// Checks that a limit is a positive integer and converts it to a length.
pub fn validate_limit(limit: i64) -> Result<usize> {
    if limit <= 0 {
        return Err(GeoError::InvalidLimit(limit.to_string()));
    }
    usize::try_from(limit).map_err(|_| GeoError::InvalidLimit(limit.to_string()))
}

/// Distances from `origin` to every active candidate, sorted ascending with
/// input order preserved among equal distances.
fn rank<'a>(origin: &Coordinate, candidates: &'a [Center]) -> Result<Vec<(f64, &'a Center)>> {
    let active: Vec<&Center> = candidates.iter().filter(|c| c.is_active).collect();

    // Collected per candidate first so the reported failure is always the
    // earliest bad candidate in input order.
    #[cfg(feature = "parallel")]
    let measured: Result<Vec<(f64, &Center)>> = {
        use rayon::prelude::*;
        let per_candidate: Vec<Result<(f64, &Center)>> =
            active.par_iter().map(|&center| measure(origin, center)).collect();
        per_candidate.into_iter().collect()
    };

    #[cfg(not(feature = "parallel"))]
    let measured: Result<Vec<(f64, &Center)>> =
        active.iter().map(|&center| measure(origin, center)).collect();

    let mut ranked = measured?;
    // `sort_by` is stable, which is what keeps ties in input order.
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(ranked)
}

#[inline]
fn measure<'a>(origin: &Coordinate, center: &'a Center) -> Result<(f64, &'a Center)> {
    let location = center.coordinate();
    location.validate().map_err(|e| match e {
        GeoError::InvalidCoordinate(msg) => {
            GeoError::InvalidCoordinate(format!("center {}: {}", center.id, msg))
        }
        other => other,
    })?;
    Ok((haversine_distance(origin, &location), center))
}

fn annotate(ranked: Vec<(f64, &Center)>) -> Vec<DistancedCenter> {
    ranked
        .into_iter()
        .map(|(distance, center)| DistancedCenter::new(center.clone(), distance))
        .collect()
}
