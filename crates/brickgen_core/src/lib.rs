//! Brickgen Core - Backend logic for the brick dataset generator
//!
//! This crate contains all pipeline logic with zero CLI dependencies:
//! catalog scanning, job planning, render dispatch, and randomized
//! scene parameter generation. It is used by the `brickgen` and
//! `brickgen-render` binaries.

pub mod catalog;
pub mod config;
pub mod jobs;
pub mod logging;
pub mod render;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
