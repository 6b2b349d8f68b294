//! CLI utilities for relief center tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Distance and count formatting
//! - Rendering center records for the terminal

#![warn(missing_docs)]

pub mod output;
