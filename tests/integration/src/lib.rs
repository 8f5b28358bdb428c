//! Integration tests for framebench
//!
//! This crate exercises the full reporting pipeline:
//! - Loading newline-delimited results files, including corrupt lines
//! - Aggregation and framework comparison across conditions
//! - Report export in every supported format
//! - Index page regeneration

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;

#[cfg(test)]
mod e2e_tests;
