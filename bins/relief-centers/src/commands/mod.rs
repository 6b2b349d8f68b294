//! CLI command implementations

pub mod query;
pub mod records;

use clap::{Args, ValueEnum};
use relief_core::config::QueryConfig;
use relief_core::prelude::*;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// The JSON response envelope
    Json,
}

/// Optional fields that `update --clear` can remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearField {
    Description,
    Capacity,
    Phone,
    Email,
    Facilities,
}

/// Optional record fields shared by `add` and `update`
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Number of people the center can hold
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Contact email address
    #[arg(long)]
    pub email: Option<String>,

    /// Facility tag (repeatable), e.g. --facility water --facility medical
    #[arg(long = "facility")]
    pub facilities: Vec<String>,
}

impl RecordArgs {
    pub fn into_new_center(self, name: String, address: String, lat: f64, lng: f64) -> NewCenter {
        NewCenter {
            description: self.description,
            capacity: self.capacity,
            contact_phone: self.phone,
            contact_email: self.email,
            facilities: self.facilities,
            ..NewCenter::new(name, address, lat, lng)
        }
    }

    /// Builds a patch; `--clear` wins over a value given for the same field.
    pub fn into_patch(
        self,
        name: Option<String>,
        address: Option<String>,
        lat: Option<f64>,
        lng: Option<f64>,
        active: Option<bool>,
        clear: &[ClearField],
    ) -> CenterPatch {
        let cleared = |field| clear.contains(&field);
        CenterPatch {
            name,
            address,
            latitude: lat,
            longitude: lng,
            description: if cleared(ClearField::Description) { Some(None) } else { self.description.map(Some) },
            capacity: if cleared(ClearField::Capacity) { Some(None) } else { self.capacity.map(Some) },
            contact_phone: if cleared(ClearField::Phone) { Some(None) } else { self.phone.map(Some) },
            contact_email: if cleared(ClearField::Email) { Some(None) } else { self.email.map(Some) },
            facilities: if cleared(ClearField::Facilities) {
                Some(Vec::new())
            } else if self.facilities.is_empty() {
                None
            } else {
                Some(self.facilities)
            },
            is_active: active,
        }
    }
}

/// Shared state for one command invocation
pub struct Context {
    pub service: CenterService<JsonFileStore>,
    pub defaults: QueryConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(store: JsonFileStore, defaults: QueryConfig, format: OutputFormat) -> Self {
        Self {
            service: CenterService::with_defaults(store, defaults.clone()),
            defaults,
            format,
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print a response envelope as JSON
    pub fn emit<T: Serialize>(&self, response: &ApiResponse<T>) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(response)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RecordArgs {
        RecordArgs {
            description: Some("School hall".into()),
            capacity: Some(120),
            phone: None,
            email: None,
            facilities: vec![],
        }
    }

    #[test]
    fn test_new_center_from_args() {
        let center = args().into_new_center("Hall".into(), "Road".into(), 6.9, 79.8);
        assert_eq!(center.capacity, Some(120));
        assert_eq!(center.description.as_deref(), Some("School hall"));
        assert!(center.facilities.is_empty());
    }

    #[test]
    fn test_patch_only_sets_given_fields() {
        let patch = args().into_patch(None, None, Some(7.0), None, None, &[]);
        assert_eq!(patch.latitude, Some(7.0));
        assert_eq!(patch.capacity, Some(Some(120)));
        assert_eq!(patch.contact_phone, None);
        assert_eq!(patch.facilities, None);
    }

    #[test]
    fn test_clear_wins() {
        let patch = args().into_patch(
            None,
            None,
            None,
            None,
            Some(false),
            &[ClearField::Description, ClearField::Facilities],
        );
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.facilities, Some(vec![]));
        assert_eq!(patch.is_active, Some(false));
    }
}
