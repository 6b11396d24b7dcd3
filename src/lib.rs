//! Credit-weighted CGPA calculation for tiered academic programs
//!
//! The computational core lives in [`core`]: the grade-point lookup
//! ([`core::grading`]), the weighted average and cumulative merge
//! ([`core::cgpa`]), and the adapter from grade sheets to graded items
//! ([`core::selection`]). [`config`] resolves which grade table and catalog
//! a run uses.

pub mod config;
pub mod core;

pub use crate::core::get_version;
