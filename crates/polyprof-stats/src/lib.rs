//! polyprof-stats - Running weighted statistics for profile bins
//!
//! This crate provides the per-bin accumulator used by polygon profiles:
//!
//! - **StatBin**: streaming weighted sums with a cached average and error
//! - **ErrorMode**: spread of the values, or error on the mean
//! - **WeightedSums**: a plain snapshot of the running sums for export
//!
//! # Merging
//!
//! Bins filled independently (one per worker) are combined by summing their
//! running sums. Cached averages and errors are never combined directly;
//! they are recomputed from the merged sums with [`StatBin::update`].

pub mod stat_bin;

pub use stat_bin::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
