//! Core services for relief center tools
//!
//! This crate sits between a caller (CLI, HTTP handler) and the geospatial
//! core in `relief-geo`:
//!
//! - **Error handling**: Errors with codes, HTTP status and recovery suggestions
//! - **Center store**: The persistence seam, with in-memory and JSON file stores
//! - **Query service**: List-by-radius, nearest and record maintenance
//! - **Configuration**: TOML-based query defaults with validation
//! - **Parameters**: Parsing raw query text into typed values
//!
//! # Example
//!
//! ```rust
//! use relief_core::prelude::*;
//!
//! let service = CenterService::new(MemoryStore::new());
//! service
//!     .create(NewCenter::new("Town Hall", "1 Main St", 6.9271, 79.8612))
//!     .unwrap();
//!
//! let nearest = service
//!     .list_nearest(&NearestQuery {
//!         origin: Coordinate::new(6.93, 79.86),
//!         limit: None,
//!     })
//!     .unwrap();
//! assert_eq!(nearest.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod model;
pub mod params;
pub mod response;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, QueryConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
    pub use crate::model::{CenterPatch, NewCenter};
    pub use crate::response::ApiResponse;
    pub use crate::service::{CenterListing, CenterService, ListQuery, NearestQuery};
    pub use crate::store::{CenterStore, JsonFileStore, MemoryStore};
    pub use crate::validation::{ValidationResult, Validator};
    pub use relief_geo::{Center, Coordinate, DistancedCenter};
}
