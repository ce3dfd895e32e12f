//! Test support for the lesson-games crate.
//!
//! Shared logging initialisation, unique fixture names and problem-details
//! assertions for unit and integration tests.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
