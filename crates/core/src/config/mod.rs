//! Configuration loading and schema definitions
//!
//! Query defaults, store location and log level for relief center tools.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
