//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use relief_geo::{Center, DistancedCenter};

/// Widest an address is printed in list rows
const ADDRESS_WIDTH: usize = 48;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(console::measure_text_width(message)));
    }
}

/// Format a distance in kilometers for display
///
/// Short distances are shown in meters.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 100.0 {
        format!("{:.2} km", km)
    } else {
        format!("{:.0} km", km)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One list row: id, name, address and, for distanced results, the distance.
pub fn center_row(center: &Center, distance: Option<f64>) -> String {
    let address = console::truncate_str(&center.address, ADDRESS_WIDTH, "…");
    let mut row = format!("{:>5}  {}  {}", format!("#{}", center.id).dimmed(), center.name.bold(), address.dimmed());
    if let Some(km) = distance {
        row.push_str(&format!("  {}", format_distance(km).cyan()));
    }
    if !center.is_active {
        row.push_str(&format!("  {}", "(inactive)".yellow()));
    }
    row
}

/// Print distanced results, closest first
pub fn print_distanced(results: &[DistancedCenter]) {
    for result in results {
        println!("{}", center_row(&result.center, Some(result.distance)));
    }
}

/// Print results without distances
pub fn print_plain(centers: &[Center]) {
    for center in centers {
        println!("{}", center_row(center, None));
    }
}

/// Print every field of a single center
pub fn print_detail(center: &Center) {
    Status::header(&center.name);
    field("Id", &center.id.to_string());
    field("Address", &center.address);
    field("Location", &center.coordinate().to_string());
    if let Some(description) = &center.description {
        field("About", description);
    }
    if let Some(capacity) = center.capacity {
        field("Capacity", &format_count(capacity as usize, "person", "people"));
    }
    if let Some(phone) = &center.contact_phone {
        field("Phone", phone);
    }
    if let Some(email) = &center.contact_email {
        field("Email", email);
    }
    if !center.facilities.is_empty() {
        field("Facilities", &center.facilities.join(", "));
    }
    field("Active", if center.is_active { "yes" } else { "no" });
    field("Updated", &center.updated_at.format("%Y-%m-%d %H:%M UTC").to_string());
}

fn field(label: &str, value: &str) {
    println!("  {:<11}{}", format!("{}:", label).dimmed(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn center() -> Center {
        let at = Utc.with_ymd_and_hms(2024, 11, 27, 8, 0, 0).unwrap();
        Center {
            id: 12,
            name: "Town Hall".to_string(),
            address: "1 Main Street, Colombo".to_string(),
            description: None,
            latitude: 6.9157,
            longitude: 79.8636,
            capacity: Some(300),
            contact_phone: None,
            contact_email: None,
            facilities: vec![],
            is_active: true,
            user_id: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(0.25), "250 m");
        assert_eq!(format_distance(0.0), "0 m");
    }

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance(12.345), "12.35 km");
        assert_eq!(format_distance(1234.4), "1234 km");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "center", "centers"), "1 center");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(0, "center", "centers"), "0 centers");
    }

    #[test]
    fn test_center_row_mentions_distance_and_state() {
        let row = center_row(&center(), Some(1.5));
        assert!(row.contains("Town Hall"));
        assert!(row.contains("1.50 km"));
        assert!(!row.contains("inactive"));

        let mut closed = center();
        closed.is_active = false;
        assert!(center_row(&closed, None).contains("(inactive)"));
    }

    #[test]
    fn test_center_row_truncates_long_address() {
        let mut long = center();
        long.address = "x".repeat(200);
        let row = center_row(&long, None);
        assert!(row.contains('…'));
        assert!(!row.contains(&"x".repeat(ADDRESS_WIDTH + 1)));
    }
}
