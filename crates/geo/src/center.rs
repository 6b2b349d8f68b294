//! Relief center records as seen by the query core.

use crate::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered disaster-relief center.
///
/// Only `latitude`, `longitude` and `is_active` matter to geospatial queries;
/// everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Center {
    /// Location of the center.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A center annotated with its distance from a query origin.
///
/// Serializes as the center's own fields plus `distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistancedCenter {
    #[serde(flatten)]
    pub center: Center,
    /// Great-circle distance in kilometers
    pub distance: f64,
}

impl DistancedCenter {
    pub fn new(center: Center, distance: f64) -> Self {
        Self { center, distance }
    }
}
