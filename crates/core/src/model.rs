//! Request payloads for creating and updating centers

use crate::error::Result;
use crate::validation::Validator;
use chrono::{DateTime, Utc};
use relief_geo::Center;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_NAME_LENGTH: usize = 200;
const MAX_ADDRESS_LENGTH: usize = 500;

/// Input for registering a new center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCenter {
    /// Display name, required
    pub name: String,
    /// Street address, required
    pub address: String,
    /// Free-text notes
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Number of people the center can hold
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Contact phone number
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Contact email address
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Facility tags such as "water" or "medical"
    #[serde(default)]
    pub facilities: Vec<String>,
    /// Account that registered the center
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl NewCenter {
    /// A minimal input with just the required fields.
    pub fn new(name: impl Into<String>, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            description: None,
            latitude,
            longitude,
            capacity: None,
            contact_phone: None,
            contact_email: None,
            facilities: Vec::new(),
            user_id: None,
        }
    }

    /// Checks required fields and the location.
    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .required("name", &self.name)
            .max_length("name", &self.name, MAX_NAME_LENGTH)
            .required("address", &self.address)
            .max_length("address", &self.address, MAX_ADDRESS_LENGTH)
            .latitude("latitude", self.latitude)
            .longitude("longitude", self.longitude)
            .validate()
            .to_result()
    }

    /// Builds the stored record. New centers always start active.
    pub fn into_center(self, id: i64, now: DateTime<Utc>) -> Center {
        Center {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            capacity: self.capacity,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            facilities: self.facilities,
            is_active: true,
            user_id: self.user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a center.
///
/// Absent fields are left alone. For the nullable fields, an explicit `null`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New notes; `Some(None)` clears them
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// New longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// New capacity; `Some(None)` clears it
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Option<u32>>,
    /// New phone; `Some(None)` clears it
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<Option<String>>,
    /// New email; `Some(None)` clears it
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<Option<String>>,
    /// Replacement facility tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    /// Activate or deactivate the center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CenterPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks every field the patch sets.
    pub fn validate(&self) -> Result<()> {
        let mut validator = Validator::new();
        if let Some(name) = &self.name {
            validator = validator
                .required("name", name)
                .max_length("name", name, MAX_NAME_LENGTH);
        }
        if let Some(address) = &self.address {
            validator = validator
                .required("address", address)
                .max_length("address", address, MAX_ADDRESS_LENGTH);
        }
        if let Some(latitude) = self.latitude {
            validator = validator.latitude("latitude", latitude);
        }
        if let Some(longitude) = self.longitude {
            validator = validator.longitude("longitude", longitude);
        }
        validator.validate().to_result()
    }

    /// Applies the patch in place and bumps `updated_at`.
    pub fn apply(self, center: &mut Center, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            center.name = name.trim().to_string();
        }
        if let Some(address) = self.address {
            center.address = address.trim().to_string();
        }
        if let Some(description) = self.description {
            center.description = description;
        }
        if let Some(latitude) = self.latitude {
            center.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            center.longitude = longitude;
        }
        if let Some(capacity) = self.capacity {
            center.capacity = capacity;
        }
        if let Some(phone) = self.contact_phone {
            center.contact_phone = phone;
        }
        if let Some(email) = self.contact_email {
            center.contact_email = email;
        }
        if let Some(facilities) = self.facilities {
            center.facilities = facilities;
        }
        if let Some(is_active) = self.is_active {
            center.is_active = is_active;
        }
        center.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use serde_json::json;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 27, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_new_center_requires_name_and_address() {
        let err = NewCenter::new("", "Temple Rd", 6.9, 79.8).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("name"));

        assert!(NewCenter::new("School", " ", 6.9, 79.8).validate().is_err());
        assert!(NewCenter::new("School", "Temple Rd", 6.9, 79.8).validate().is_ok());
    }

    #[test]
    fn test_new_center_rejects_bad_location() {
        let err = NewCenter::new("School", "Temple Rd", 95.0, 79.8).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_into_center_is_active_and_trimmed() {
        let center = NewCenter::new("  School ", "Temple Rd", 6.9, 79.8).into_center(3, created());
        assert_eq!(center.id, 3);
        assert_eq!(center.name, "School");
        assert!(center.is_active);
        assert!(center.facilities.is_empty());
        assert_eq!(center.created_at, center.updated_at);
    }

    #[test]
    fn test_new_center_deserializes_camel_case() {
        let input: NewCenter = serde_json::from_value(json!({
            "name": "Stadium",
            "address": "Main St",
            "latitude": 7.0,
            "longitude": 80.0,
            "contactPhone": "119",
            "facilities": ["food", "water"]
        }))
        .unwrap();
        assert_eq!(input.contact_phone.as_deref(), Some("119"));
        assert_eq!(input.facilities.len(), 2);
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: CenterPatch = serde_json::from_value(json!({
            "description": null,
            "capacity": 40
        }))
        .unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.capacity, Some(Some(40)));
        assert_eq!(patch.contact_phone, None);
    }

    #[test]
    fn test_patch_apply() {
        let mut center = NewCenter {
            description: Some("Old".into()),
            contact_phone: Some("111".into()),
            ..NewCenter::new("School", "Temple Rd", 6.9, 79.8)
        }
        .into_center(1, created());

        let later = Utc.with_ymd_and_hms(2024, 11, 28, 8, 0, 0).unwrap();
        CenterPatch {
            description: Some(None),
            latitude: Some(7.1),
            is_active: Some(false),
            ..CenterPatch::default()
        }
        .apply(&mut center, later);

        assert_eq!(center.description, None);
        assert_eq!(center.contact_phone.as_deref(), Some("111"));
        assert_eq!(center.latitude, 7.1);
        assert_eq!(center.longitude, 79.8);
        assert!(!center.is_active);
        assert_eq!(center.updated_at, later);
        assert_eq!(center.created_at, created());
    }

    #[test]
    fn test_patch_validation() {
        assert!(CenterPatch::default().validate().is_ok());
        assert!(CenterPatch::default().is_empty());

        let err = CenterPatch {
            longitude: Some(181.0),
            ..CenterPatch::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);

        let err = CenterPatch {
            name: Some("".into()),
            ..CenterPatch::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("name"));
    }
}
