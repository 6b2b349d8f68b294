//! In-memory center store

use super::{next_id, select_active, CenterStore};
use crate::error::Result;
use crate::model::{CenterPatch, NewCenter};
use chrono::Utc;
use relief_geo::{BoundingBox, Center};
use std::sync::RwLock;

/// A center store held entirely in memory.
///
/// Reads take a shared lock, so concurrent queries never wait on each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    centers: Vec<Center>,
    /// Ids are never reused, even after a delete.
    last_id: i64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing records
    pub fn with_centers(centers: Vec<Center>) -> Self {
        let last_id = next_id(&centers) - 1;
        Self {
            inner: RwLock::new(Inner { centers, last_id }),
        }
    }

    /// Number of stored centers, active or not
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).centers.len()
    }

    /// Returns true if the store holds no centers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored center in insertion order
    pub fn all(&self) -> Vec<Center> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).centers.clone()
    }
}

impl CenterStore for MemoryStore {
    fn fetch_active(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Center>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(select_active(&inner.centers, bounds))
    }

    fn get(&self, id: i64) -> Result<Option<Center>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.centers.iter().find(|c| c.id == id).cloned())
    }

    fn insert(&self, center: NewCenter) -> Result<Center> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.last_id += 1;
        let record = center.into_center(inner.last_id, Utc::now());
        inner.centers.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: i64, patch: CenterPatch) -> Result<Option<Center>> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        Ok(inner.centers.iter_mut().find(|c| c.id == id).map(|center| {
            patch.apply(center, Utc::now());
            center.clone()
        }))
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let before = inner.centers.len();
        inner.centers.retain(|c| c.id != id);
        Ok(inner.centers.len() != before)
    }
}
