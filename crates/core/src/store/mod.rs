//! Center store collaborators
//!
//! The query core never talks to a database directly. It asks a
//! [`CenterStore`] for a snapshot of active centers and does the geometry
//! itself, so a store only has to be a correct provider of records.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::{CenterPatch, NewCenter};
use relief_geo::{BoundingBox, Center};

/// Persistence for center records.
///
/// Failures to reach or read the backing storage are reported as
/// [`ErrorCode::UpstreamFetchFailure`](crate::ErrorCode::UpstreamFetchFailure).
pub trait CenterStore {
    /// Active centers, newest first (`created_at` then `id`, descending).
    ///
    /// `bounds` is a hint: a store may return centers outside it, but must
    /// not drop any active center inside it.
    fn fetch_active(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Center>>;

    /// A single center by id, active or not.
    fn get(&self, id: i64) -> Result<Option<Center>>;

    /// Stores a new, already validated center and returns the record.
    fn insert(&self, center: NewCenter) -> Result<Center>;

    /// Applies a validated patch. Returns `None` if the id is unknown.
    fn update(&self, id: i64, patch: CenterPatch) -> Result<Option<Center>>;

    /// Removes a center. Returns `false` if the id is unknown.
    fn delete(&self, id: i64) -> Result<bool>;
}

impl<S: CenterStore + ?Sized> CenterStore for &S {
    fn fetch_active(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Center>> {
        (**self).fetch_active(bounds)
    }

    fn get(&self, id: i64) -> Result<Option<Center>> {
        (**self).get(id)
    }

    fn insert(&self, center: NewCenter) -> Result<Center> {
        (**self).insert(center)
    }

    fn update(&self, id: i64, patch: CenterPatch) -> Result<Option<Center>> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        (**self).delete(id)
    }
}

/// Active centers from `centers` inside `bounds`, newest first.
///
/// Records with an invalid stored location are never dropped by `bounds`,
/// so the query sees them and fails the same way it would without a box.
pub(crate) fn select_active(centers: &[Center], bounds: Option<&BoundingBox>) -> Vec<Center> {
    let mut active: Vec<Center> = centers
        .iter()
        .filter(|c| c.is_active)
        .filter(|c| {
            let coord = c.coordinate();
            bounds.map_or(true, |b| !coord.is_valid() || b.contains(&coord))
        })
        .cloned()
        .collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    active
}

/// Next id after the largest one in use.
pub(crate) fn next_id(centers: &[Center]) -> i64 {
    centers.iter().map(|c| c.id).max().unwrap_or(0) + 1
}
