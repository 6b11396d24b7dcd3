//! Core CGPA functionality shared by the CLI and tests

pub mod cgpa;
pub mod error;
pub mod grading;
pub mod models;
pub mod report;
pub mod selection;

pub use cgpa::{calculate_cgpa, update_overall_cgpa, weighted_average, CumulativeState, GradeEntry};
pub use error::CgpaError;
pub use grading::{Grade, GradeScale, ScalePreset};

/// Returns the current version of the `cgpa-calculator` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
