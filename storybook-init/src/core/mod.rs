//! Deterministic, pure logic for preparing a workspace for Storybook.
//!
//! Core modules must be free of I/O side effects. They operate on parsed JSON
//! documents and return deterministic outputs suitable for tests. Malformed
//! input is reported as a `String` describing the offending field.

pub mod cache_config;
pub mod framework;
pub mod json;
pub mod manifest;
pub mod planner;
pub mod types;
pub mod versions;
