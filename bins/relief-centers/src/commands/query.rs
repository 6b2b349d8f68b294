//! Location queries: list, nearest and distance

use super::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use relief_cli::output::{self, format_count, format_distance, Status};
use relief_core::params::{parse_limit, parse_origin, parse_radius, require_origin};
use relief_core::prelude::*;
use serde::Serialize;

/// Run the list command
pub fn list(
    ctx: &Context,
    lat: Option<&str>,
    lng: Option<&str>,
    radius: Option<&str>,
    limit: Option<&str>,
) -> Result<()> {
    let query = ListQuery {
        origin: parse_origin(lat, lng)?,
        radius_km: parse_radius(radius)?,
        limit: parse_limit(limit)?,
    };

    let listing = {
        relief_telemetry::timed_span!("list_by_radius");
        ctx.service.list_by_radius(&query)?
    };
    let count = listing.len();

    if ctx.is_json() {
        let mut response = ApiResponse::ok(listing).with_count(count);
        if let Some(origin) = query.origin {
            response = response.with_user_location(origin);
        }
        return ctx.emit(&response);
    }

    match (&listing, query.origin) {
        (CenterListing::Distanced(results), Some(origin)) => {
            let radius_km = query.radius_km.unwrap_or(ctx.defaults.default_radius_km);
            Status::header(&format!(
                "Disaster centers within {} of {}",
                format_distance(radius_km),
                origin
            ));
            output::print_distanced(results);
        }
        (CenterListing::Plain(centers), _) => {
            Status::header("Disaster centers");
            output::print_plain(centers);
        }
        (CenterListing::Distanced(results), None) => output::print_distanced(results),
    }
    print_summary(count);
    Ok(())
}

/// Run the nearest command
pub fn nearest(ctx: &Context, lat: Option<&str>, lng: Option<&str>, limit: Option<&str>) -> Result<()> {
    let query = NearestQuery {
        origin: require_origin(lat, lng)?,
        limit: parse_limit(limit)?,
    };

    let results = {
        relief_telemetry::timed_span!("list_nearest");
        ctx.service.list_nearest(&query)?
    };
    let count = results.len();

    if ctx.is_json() {
        let response = ApiResponse::ok(results)
            .with_count(count)
            .with_user_location(query.origin);
        return ctx.emit(&response);
    }

    Status::header(&format!("Nearest disaster centers to {}", query.origin));
    output::print_distanced(&results);
    print_summary(count);
    Ok(())
}

#[derive(Debug, Serialize)]
struct DistanceOutput {
    from: Coordinate,
    to: Coordinate,
    distance: f64,
}

/// Run the distance command
pub fn distance(ctx: &Context, from: Coordinate, to: Coordinate) -> Result<()> {
    let km = relief_geo::distance(&from, &to).map_err(relief_core::Error::from)?;

    if ctx.is_json() {
        return ctx.emit(&ApiResponse::ok(DistanceOutput { from, to, distance: km }));
    }

    println!("{} → {}: {}", from, to, format_distance(km).cyan().bold());
    Ok(())
}

fn print_summary(count: usize) {
    println!();
    if count == 0 {
        Status::warning("No disaster centers found");
    } else {
        Status::info(&format!("Found {}", format_count(count, "center", "centers")));
    }
}
