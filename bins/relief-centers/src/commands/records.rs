//! Record maintenance: show, add, update and remove

use super::Context;
use anyhow::Result;
use relief_cli::output::{self, Status};
use relief_core::prelude::*;

/// Run the show command
pub fn show(ctx: &Context, id: i64) -> Result<()> {
    let center = ctx.service.get(id)?;
    if ctx.is_json() {
        return ctx.emit(&ApiResponse::ok(center));
    }
    output::print_detail(&center);
    Ok(())
}

/// Run the add command
pub fn add(ctx: &Context, input: NewCenter) -> Result<()> {
    let center = ctx.service.create(input)?;
    if ctx.is_json() {
        return ctx.emit(&ApiResponse::ok(center).with_message("Disaster center created successfully"));
    }
    Status::success(&format!("Created disaster center #{} {}", center.id, center.name));
    Ok(())
}

/// Run the update command
pub fn update(ctx: &Context, id: i64, patch: CenterPatch) -> Result<()> {
    if patch.is_empty() {
        // Nothing to change: report the current record without rewriting the file.
        let center = ctx.service.get(id)?;
        if ctx.is_json() {
            return ctx.emit(&ApiResponse::ok(center).with_message("No changes"));
        }
        Status::warning(&format!("No changes for disaster center #{}", center.id));
        return Ok(());
    }

    let center = ctx.service.update(id, patch)?;
    if ctx.is_json() {
        return ctx.emit(&ApiResponse::ok(center).with_message("Disaster center updated successfully"));
    }
    Status::success(&format!("Updated disaster center #{} {}", center.id, center.name));
    Ok(())
}

/// Run the remove command
pub fn remove(ctx: &Context, id: i64) -> Result<()> {
    ctx.service.delete(id)?;
    if ctx.is_json() {
        return ctx.emit(&ApiResponse::message("Disaster center deleted successfully"));
    }
    Status::success(&format!("Deleted disaster center #{}", id));
    Ok(())
}
