//! Dense search over template placements.
//!
//! The scan module provides the baseline scalar evaluation; the rayon
//! module adds a row-parallel variant with identical results.

pub mod scan;

#[cfg(feature = "rayon")]
pub mod rayon;
