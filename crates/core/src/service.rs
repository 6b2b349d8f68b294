//! Center query service
//!
//! Fetches a snapshot from the store and runs the geospatial core over it.
//! Each call either returns a complete, ordered result or fails; there are
//! no partial results.

use crate::config::QueryConfig;
use crate::error::{Error, Result};
use crate::model::{CenterPatch, NewCenter};
use crate::store::CenterStore;
use relief_geo::proximity::{validate_limit, validate_radius};
use relief_geo::{filter_by_radius, nearest, BoundingBox, Center, Coordinate, DistancedCenter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Parameters of a list-by-radius query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Without an origin, all active centers are listed without distances
    pub origin: Option<Coordinate>,
    /// Search radius in kilometers, defaulting to the configured radius
    pub radius_km: Option<f64>,
    /// Maximum number of centers, defaulting to the configured limit
    pub limit: Option<i64>,
}

/// Parameters of a nearest query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestQuery {
    /// Search origin
    pub origin: Coordinate,
    /// Number of centers, defaulting to the configured nearest limit
    pub limit: Option<i64>,
}

/// Result of a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterListing {
    /// Query had no origin: store order, no distance
    Plain(Vec<Center>),
    /// Query had an origin: closest first, with distance
    Distanced(Vec<DistancedCenter>),
}

impl CenterListing {
    /// Number of centers in the listing
    pub fn len(&self) -> usize {
        match self {
            CenterListing::Plain(centers) => centers.len(),
            CenterListing::Distanced(centers) => centers.len(),
        }
    }

    /// Whether the listing has no centers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids in result order
    pub fn ids(&self) -> Vec<i64> {
        match self {
            CenterListing::Plain(centers) => centers.iter().map(|c| c.id).collect(),
            CenterListing::Distanced(centers) => centers.iter().map(|c| c.center.id).collect(),
        }
    }
}

/// Query and CRUD operations over a [`CenterStore`].
#[derive(Debug)]
pub struct CenterService<S> {
    store: S,
    defaults: QueryConfig,
}

impl<S: CenterStore> CenterService<S> {
    /// Create a service with the built-in query defaults
    pub fn new(store: S) -> Self {
        Self::with_defaults(store, QueryConfig::default())
    }

    /// Create a service with configured query defaults
    pub fn with_defaults(store: S, defaults: QueryConfig) -> Self {
        Self { store, defaults }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists active centers, optionally restricted to a radius around an origin.
    ///
    /// Defaults: radius 50 km, limit 100 (or as configured).
    pub fn list_by_radius(&self, query: &ListQuery) -> Result<CenterListing> {
        let limit = validate_limit(query.limit.unwrap_or(self.defaults.default_list_limit))?;

        let Some(origin) = query.origin else {
            let mut centers = self.fetch(None)?;
            centers.retain(|c| c.is_active);
            centers.truncate(limit);
            debug!(limit, returned = centers.len(), "Listed centers without origin");
            return Ok(CenterListing::Plain(centers));
        };

        let radius_km = validate_radius(query.radius_km.unwrap_or(self.defaults.default_radius_km))?;
        origin.validate()?;

        let bounds = if self.defaults.use_bounding_box {
            Some(BoundingBox::around(&origin, radius_km)?)
        } else {
            None
        };
        let snapshot = self.fetch(bounds.as_ref())?;

        let mut results = filter_by_radius(&origin, radius_km, &snapshot)?;
        results.truncate(limit);

        debug!(
            %origin,
            radius_km,
            limit,
            candidates = snapshot.len(),
            returned = results.len(),
            "Radius query complete"
        );
        Ok(CenterListing::Distanced(results))
    }

    /// The closest active centers to an origin. Default limit 5 (or as configured).
    pub fn list_nearest(&self, query: &NearestQuery) -> Result<Vec<DistancedCenter>> {
        let limit = query.limit.unwrap_or(self.defaults.default_nearest_limit);
        validate_limit(limit)?;
        query.origin.validate()?;

        let snapshot = self.fetch(None)?;
        let results = nearest(&query.origin, limit, &snapshot)?;

        debug!(
            origin = %query.origin,
            limit,
            candidates = snapshot.len(),
            returned = results.len(),
            "Nearest query complete"
        );
        Ok(results)
    }

    /// A single center by id, active or not.
    pub fn get(&self, id: i64) -> Result<Center> {
        self.store
            .get(id)
            .map_err(|e| log_store_failure("get", e))?
            .ok_or_else(|| Error::not_found(id))
    }

    /// Registers a new center.
    pub fn create(&self, input: NewCenter) -> Result<Center> {
        input.validate()?;
        let center = self
            .store
            .insert(input)
            .map_err(|e| log_store_failure("insert", e))?;
        info!(id = center.id, name = %center.name, "Disaster center created");
        Ok(center)
    }

    /// Applies a partial update.
    pub fn update(&self, id: i64, patch: CenterPatch) -> Result<Center> {
        patch.validate()?;
        let center = self
            .store
            .update(id, patch)
            .map_err(|e| log_store_failure("update", e))?
            .ok_or_else(|| Error::not_found(id))?;
        info!(id, active = center.is_active, "Disaster center updated");
        Ok(center)
    }

    /// Removes a center.
    pub fn delete(&self, id: i64) -> Result<()> {
        let removed = self
            .store
            .delete(id)
            .map_err(|e| log_store_failure("delete", e))?;
        if !removed {
            return Err(Error::not_found(id));
        }
        info!(id, "Disaster center deleted");
        Ok(())
    }

    fn fetch(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Center>> {
        self.store
            .fetch_active(bounds)
            .map_err(|e| log_store_failure("fetch_active", e))
    }
}

fn log_store_failure(operation: &str, err: Error) -> Error {
    warn!(operation, code = %err.code, error = %err.message, "Center store call failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    /// Kilometers per degree of longitude on the equator.
    const KM_PER_DEGREE: f64 = 111.194_926_644_558_73;

    fn service_with(centers: &[(&str, f64, f64)]) -> CenterService<MemoryStore> {
        let service = CenterService::new(MemoryStore::new());
        for (name, lat, lng) in centers {
            service.create(NewCenter::new(*name, "Relief Rd", *lat, *lng)).unwrap();
        }
        service
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    #[test]
    fn test_list_without_origin_returns_plain_listing() {
        let service = service_with(&[("A", 0.0, 0.0), ("B", 50.0, 50.0)]);
        let listing = service.list_by_radius(&ListQuery::default()).unwrap();
        assert!(matches!(listing, CenterListing::Plain(_)));
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn test_list_without_origin_respects_limit() {
        let service = service_with(&[("A", 0.0, 0.0), ("B", 1.0, 1.0), ("C", 2.0, 2.0)]);
        let listing = service
            .list_by_radius(&ListQuery { limit: Some(2), ..ListQuery::default() })
            .unwrap();
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn test_list_with_origin_uses_default_radius() {
        // 40 km and 60 km east of the origin; default radius is 50 km
        let service = service_with(&[
            ("Far", 0.0, 60.0 / KM_PER_DEGREE),
            ("Near", 0.0, 40.0 / KM_PER_DEGREE),
        ]);
        let listing = service
            .list_by_radius(&ListQuery { origin: Some(origin()), ..ListQuery::default() })
            .unwrap();
        let CenterListing::Distanced(results) = listing else {
            panic!("expected distances");
        };
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].center.name, "Near");
    }

    #[test]
    fn test_list_radius_filter_then_truncate() {
        let service = service_with(&[
            ("3km", 0.0, 3.0 / KM_PER_DEGREE),
            ("1km", 0.0, 1.0 / KM_PER_DEGREE),
            ("2km", 0.0, 2.0 / KM_PER_DEGREE),
        ]);
        let listing = service
            .list_by_radius(&ListQuery {
                origin: Some(origin()),
                radius_km: Some(10.0),
                limit: Some(2),
            })
            .unwrap();
        let CenterListing::Distanced(results) = listing else {
            panic!("expected distances");
        };
        let names: Vec<&str> = results.iter().map(|r| r.center.name.as_str()).collect();
        assert_eq!(names, vec!["1km", "2km"]);
    }

    #[test]
    fn test_bounding_box_does_not_change_results() {
        let centers = [
            ("A", 0.0, 0.3),
            ("B", 0.2, -0.1),
            ("C", 1.5, 0.0),
            ("D", -0.4, 0.4),
        ];
        let with_box = service_with(&centers);
        let without_box = CenterService::with_defaults(
            MemoryStore::with_centers(with_box.store().all()),
            QueryConfig { use_bounding_box: false, ..QueryConfig::default() },
        );
        let query = ListQuery {
            origin: Some(origin()),
            radius_km: Some(70.0),
            limit: None,
        };
        assert_eq!(
            with_box.list_by_radius(&query).unwrap(),
            without_box.list_by_radius(&query).unwrap()
        );
    }

    fn stored(centers: &[(f64, f64)]) -> Vec<Center> {
        let now = chrono::Utc::now();
        centers
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| {
                NewCenter::new(format!("C{}", i + 1), "Relief Rd", *lat, *lng).into_center(i as i64 + 1, now)
            })
            .collect()
    }

    fn with_and_without_box(centers: Vec<Center>) -> (CenterService<MemoryStore>, CenterService<MemoryStore>) {
        let boxed = CenterService::new(MemoryStore::with_centers(centers.clone()));
        let unboxed = CenterService::with_defaults(
            MemoryStore::with_centers(centers),
            QueryConfig { use_bounding_box: false, ..QueryConfig::default() },
        );
        (boxed, unboxed)
    }

    #[test]
    fn test_bad_stored_location_fails_with_or_without_box() {
        let (boxed, unboxed) = with_and_without_box(stored(&[(0.0, 0.1), (123.0, 0.0)]));
        let query = ListQuery {
            origin: Some(origin()),
            radius_km: Some(50.0),
            limit: None,
        };
        assert_eq!(boxed.list_by_radius(&query).unwrap_err().code, ErrorCode::InvalidCoordinate);
        assert_eq!(unboxed.list_by_radius(&query).unwrap_err().code, ErrorCode::InvalidCoordinate);
    }

    proptest! {
        #[test]
        fn prop_bounding_box_never_changes_radius_results(
            centers in proptest::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 0..30),
            radius_km in 1.0f64..400.0,
            limit in 1i64..20,
        ) {
            let (boxed, unboxed) = with_and_without_box(stored(&centers));
            let query = ListQuery { origin: Some(origin()), radius_km: Some(radius_km), limit: Some(limit) };
            prop_assert_eq!(boxed.list_by_radius(&query).unwrap(), unboxed.list_by_radius(&query).unwrap());
        }

        #[test]
        fn prop_defaults_match_explicit_values(
            centers in proptest::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 0..30),
        ) {
            let service = CenterService::new(MemoryStore::with_centers(stored(&centers)));
            let defaults = QueryConfig::default();

            let implicit = service.list_by_radius(&ListQuery { origin: Some(origin()), ..ListQuery::default() }).unwrap();
            let explicit = service
                .list_by_radius(&ListQuery {
                    origin: Some(origin()),
                    radius_km: Some(defaults.default_radius_km),
                    limit: Some(defaults.default_list_limit),
                })
                .unwrap();
            prop_assert_eq!(implicit, explicit);

            let nearest = service.list_nearest(&NearestQuery { origin: origin(), limit: None }).unwrap();
            prop_assert_eq!(nearest.len(), centers.len().min(5));
        }
    }

    #[test]
    fn test_list_rejects_bad_input() {
        let service = service_with(&[]);
        let err = service
            .list_by_radius(&ListQuery { origin: Some(origin()), radius_km: Some(0.0), limit: None })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRadius);

        let err = service
            .list_by_radius(&ListQuery { origin: None, radius_km: None, limit: Some(-1) })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidLimit);

        let err = service
            .list_by_radius(&ListQuery {
                origin: Some(Coordinate::new(95.0, 0.0)),
                ..ListQuery::default()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_nearest_default_limit_is_five() {
        let centers: Vec<(String, f64, f64)> = (1..=7)
            .map(|km| (format!("{}km", km), 0.0, km as f64 / KM_PER_DEGREE))
            .collect();
        let refs: Vec<(&str, f64, f64)> = centers.iter().map(|(n, a, b)| (n.as_str(), *a, *b)).collect();
        let service = service_with(&refs);

        let results = service
            .list_nearest(&NearestQuery { origin: origin(), limit: None })
            .unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].center.name, "1km");
        assert_eq!(results[4].center.name, "5km");
    }

    #[test]
    fn test_nearest_skips_deactivated_centers() {
        let service = service_with(&[("A", 0.0, 0.01), ("B", 0.0, 0.02)]);
        service
            .update(1, CenterPatch { is_active: Some(false), ..CenterPatch::default() })
            .unwrap();
        let results = service
            .list_nearest(&NearestQuery { origin: origin(), limit: Some(5) })
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].center.name, "B");
    }

    #[test]
    fn test_nearest_rejects_zero_limit() {
        let service = service_with(&[]);
        let err = service
            .list_nearest(&NearestQuery { origin: origin(), limit: Some(0) })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidLimit);
    }

    #[test]
    fn test_crud_not_found() {
        let service = service_with(&[]);
        assert_eq!(service.get(9).unwrap_err().code, ErrorCode::CenterNotFound);
        assert_eq!(
            service.update(9, CenterPatch::default()).unwrap_err().code,
            ErrorCode::CenterNotFound
        );
        assert_eq!(service.delete(9).unwrap_err().code, ErrorCode::CenterNotFound);
    }

    #[test]
    fn test_create_validates_before_storing() {
        let service = service_with(&[]);
        let err = service.create(NewCenter::new("", "Relief Rd", 0.0, 0.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(service.store().is_empty());
    }

    struct BrokenStore;

    impl CenterStore for BrokenStore {
        fn fetch_active(&self, _bounds: Option<&BoundingBox>) -> Result<Vec<Center>> {
            Err(Error::upstream("database unavailable"))
        }
        fn get(&self, _id: i64) -> Result<Option<Center>> {
            Err(Error::upstream("database unavailable"))
        }
        fn insert(&self, _center: NewCenter) -> Result<Center> {
            Err(Error::upstream("database unavailable"))
        }
        fn update(&self, _id: i64, _patch: CenterPatch) -> Result<Option<Center>> {
            Err(Error::upstream("database unavailable"))
        }
        fn delete(&self, _id: i64) -> Result<bool> {
            Err(Error::upstream("database unavailable"))
        }
    }

    #[test]
    fn test_store_failure_propagates() {
        let service = CenterService::new(BrokenStore);
        let err = service
            .list_nearest(&NearestQuery { origin: origin(), limit: None })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamFetchFailure);
        assert_eq!(err.status_code(), 500);

        let err = service.list_by_radius(&ListQuery::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamFetchFailure);
    }

    #[test]
    fn test_invalid_input_checked_before_store() {
        // Validation errors win over store failures: the store is never called.
        let service = CenterService::new(BrokenStore);
        let err = service
            .list_nearest(&NearestQuery { origin: Coordinate::new(0.0, 200.0), limit: None })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
    }
}
