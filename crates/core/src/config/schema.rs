//! Configuration schema definitions

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,

    /// Center storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the query service would fail on at request time
    pub fn validate(&self) -> Result<()> {
        self.query.validate()
    }
}

/// Defaults applied when a query omits radius or limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Radius for list-by-radius queries, in kilometers
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Maximum number of centers a list query returns
    #[serde(default = "default_list_limit")]
    pub default_list_limit: i64,

    /// Number of centers a nearest query returns
    #[serde(default = "default_nearest_limit")]
    pub default_nearest_limit: i64,

    /// Ask the store to pre-filter radius queries by bounding box
    #[serde(default = "default_true")]
    pub use_bounding_box: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            default_list_limit: default_list_limit(),
            default_nearest_limit: default_nearest_limit(),
            use_bounding_box: true,
        }
    }
}

impl QueryConfig {
    fn validate(&self) -> Result<()> {
        if !self.default_radius_km.is_finite() || self.default_radius_km <= 0.0 {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("query.default_radius_km must be greater than 0, got {}", self.default_radius_km),
            ));
        }
        for (key, value) in [
            ("query.default_list_limit", self.default_list_limit),
            ("query.default_nearest_limit", self.default_nearest_limit),
        ] {
            if value < 1 {
                return Err(Error::new(
                    ErrorCode::ConfigValidationError,
                    format!("{} must be at least 1, got {}", key, value),
                ));
            }
        }
        Ok(())
    }
}

fn default_radius_km() -> f64 {
    50.0
}

fn default_list_limit() -> i64 {
    100
}

fn default_nearest_limit() -> i64 {
    relief_geo::DEFAULT_NEAREST_LIMIT
}

fn default_true() -> bool {
    true
}

/// Where centers are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the center records
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    "centers.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
