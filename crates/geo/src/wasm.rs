//! WASM bindings for the geo crate.
//!
//! These bindings let the map page run the same distance and proximity
//! queries in the browser against a JSON array of centers.

use crate::{distance as checked_distance, filter_by_radius, nearest, Center, Coordinate};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_centers(centers_json: &str) -> Result<Vec<Center>, JsValue> {
    serde_json::from_str(centers_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
}

/// Calculate distance between two coordinates.
///
/// # Returns
/// Distance in kilometers, or an error if either coordinate is invalid
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    checked_distance(&from, &to).map_err(js_error)
}

/// Active centers within `radius_km` of the user, closest first.
///
/// # Arguments
/// * `centers_json` - JSON array of centers (camelCase fields)
///
/// # Returns
/// JSON array of centers with an added `distance` field
#[wasm_bindgen]
pub fn centers_within_radius(
    user_lat: f64,
    user_lng: f64,
    radius_km: f64,
    centers_json: &str,
) -> Result<String, JsValue> {
    let centers = parse_centers(centers_json)?;
    let origin = Coordinate::new(user_lat, user_lng);
    let results = filter_by_radius(&origin, radius_km, &centers).map_err(js_error)?;

    serde_json::to_string(&results)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// The `limit` active centers closest to the user.
#[wasm_bindgen]
pub fn nearest_centers(
    user_lat: f64,
    user_lng: f64,
    limit: i32,
    centers_json: &str,
) -> Result<String, JsValue> {
    let centers = parse_centers(centers_json)?;
    let origin = Coordinate::new(user_lat, user_lng);
    let results = nearest(&origin, i64::from(limit), &centers).map_err(js_error)?;

    serde_json::to_string(&results)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
