//! polyprof-core - Polygon-binned profile histograms
//!
//! A profile is a 2D histogram whose bins are arbitrary shapes and whose
//! bin contents are the weighted average of a sampled value.
//!
//! # Key Components
//!
//! - **PolyProfile**: bins, lookup grid, overflow bins and global sums
//! - **BinGeometry**: caller-supplied bin shapes (rectangles built in)
//! - **OverflowRegion**: compass classification of out-of-domain points
//! - **GlobalStats**: profile-wide sums for means and spreads along x, y, z
//! - **ProfileConfig**: domain, grid size and error mode
//!
//! # Parallel filling
//!
//! A profile is filled from one thread. To fill from many, give each worker
//! its own [`PolyProfile::empty_clone`] and combine them with
//! [`PolyProfile::merge`]. With the `parallel` feature,
//! `PolyProfile::fill_parallel` does this on the rayon pool.

pub mod config;
pub mod error;
pub mod global;
pub mod overflow;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod profile;
pub mod spatial;

pub use config::*;
pub use error::{ProfileError, ProfileResult};
pub use global::*;
pub use overflow::*;
pub use profile::*;
pub use spatial::*;

pub use polyprof_stats::{ErrorMode, StatBin, WeightedSums};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
