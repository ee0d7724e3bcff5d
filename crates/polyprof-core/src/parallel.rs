//! Parallel filling with rayon
//!
//! Samples are split into chunks, each chunk is filled into its own empty
//! copy of the profile on the rayon pool, and the partial profiles are then
//! merged into the target one after another.

use rayon::prelude::*;

use crate::error::ProfileResult;
use crate::profile::{PolyProfile, Sample};

/// Default number of samples filled by one worker profile
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

impl PolyProfile {
    /// Fill samples in parallel and merge the result into this profile.
    ///
    /// Returns the number of partial profiles merged.
    pub fn fill_parallel(&mut self, samples: &[Sample], chunk_size: usize) -> ProfileResult<usize> {
        if samples.is_empty() {
            return Ok(0);
        }

        let template = self.empty_clone();
        let partials: Vec<PolyProfile> = samples
            .par_chunks(chunk_size.max(1))
            .map(|chunk| {
                let mut partial = template.clone();
                partial.extend(chunk.iter().copied());
                partial
            })
            .collect();

        tracing::debug!(
            "Filled {} samples into {} partial profiles",
            samples.len(),
            partials.len()
        );
        self.merge(&partials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = PolyProfile::with_cells(4, 0.0, 4.0, 4, 0.0, 4.0).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                sequential.add_rect(i as f64, j as f64, i as f64 + 0.99, j as f64 + 0.99);
            }
        }
        let mut parallel = sequential.empty_clone();

        let samples: Vec<Sample> = (0..1000)
            .map(|i| {
                let t = i as f64;
                Sample::new((t * 0.37) % 5.0 - 0.5, (t * 0.73) % 5.0 - 0.5, t % 7.0, 1.0)
            })
            .collect();

        sequential.extend(samples.iter().copied());
        let merged = parallel.fill_parallel(&samples, 64).unwrap();

        assert_eq!(merged, 16);
        assert_eq!(parallel.entries(), sequential.entries());
        for bin in 1..=16 {
            assert_eq!(parallel.bin_entries(bin), sequential.bin_entries(bin));
            assert!((parallel.bin_average(bin) - sequential.bin_average(bin)).abs() < 1e-9);
        }
        for slot in -9..=-1 {
            assert_eq!(parallel.bin_entries(slot), sequential.bin_entries(slot));
        }
    }

    #[test]
    fn test_no_samples() {
        let mut profile = PolyProfile::new(0.0, 1.0, 0.0, 1.0).unwrap();
        profile.add_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(profile.fill_parallel(&[], 16).unwrap(), 0);
    }
}
