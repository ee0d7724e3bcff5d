//! Weighted running statistics for a single bin
//!
//! A `StatBin` keeps four sums over the `(value, weight)` pairs it has seen:
//! Σw, Σw·v, Σw² and Σw·v². The average, the error and the effective number
//! of entries are all derived from these sums.

use serde::{Deserialize, Serialize};

/// How the error of a bin is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ErrorMode {
    /// Standard deviation of the values in the bin
    #[default]
    Spread,
    /// Error on the mean: spread divided by √(effective entries)
    MeanOfMean,
}

/// A snapshot of the four running sums of a bin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct WeightedSums {
    /// Σw
    pub sumw: f64,
    /// Σw·v
    pub sumvw: f64,
    /// Σw²
    pub sumw2: f64,
    /// Σw·v²
    pub sumwv2: f64,
}

/// Running weighted statistics of one bin
///
/// The average and error are cached. [`StatBin::fill`] refreshes them
/// immediately, [`StatBin::merge`] does not: call [`StatBin::update`] after
/// the last merge before reading them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBin {
    sums: WeightedSums,
    average: f64,
    error: f64,
    error_mode: ErrorMode,
}

impl StatBin {
    /// Create an empty bin using the spread error mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bin with the given error mode
    pub fn with_error_mode(error_mode: ErrorMode) -> Self {
        Self {
            error_mode,
            ..Self::default()
        }
    }

    /// Accumulate a value with the given weight.
    ///
    /// Negative weights are accepted and remove a previous contribution.
    pub fn fill(&mut self, value: f64, weight: f64) {
        self.sums.sumw += weight;
        self.sums.sumvw += weight * value;
        self.sums.sumw2 += weight * weight;
        self.sums.sumwv2 += weight * value * value;
        self.update();
    }

    /// Recompute the cached average and error from the running sums
    pub fn update(&mut self) {
        self.update_average();
        self.update_error();
    }

    /// Recompute the average.
    ///
    /// With a zero weight sum the previous average is kept.
    pub fn update_average(&mut self) {
        if self.sums.sumw != 0.0 {
            self.average = self.sums.sumvw / self.sums.sumw;
        }
    }

    /// Recompute the error according to the current error mode
    pub fn update_error(&mut self) {
        let spread = if self.sums.sumw != 0.0 {
            let variance = self.sums.sumwv2 / self.sums.sumw - self.average * self.average;
            // Rounding can leave a tiny negative residue for constant values
            variance.max(0.0).sqrt()
        } else {
            0.0
        };

        self.error = match self.error_mode {
            ErrorMode::Spread => spread,
            ErrorMode::MeanOfMean => {
                let neff = self.effective_entries();
                if neff > 0.0 {
                    spread / neff.sqrt()
                } else {
                    0.0
                }
            }
        };
    }

    /// Add the running sums of another bin to this one.
    ///
    /// Only the sums are combined; the cached average and error of `other`
    /// are ignored and this bin's cache is stale until [`StatBin::update`].
    pub fn merge(&mut self, other: &StatBin) {
        self.sums.sumw += other.sums.sumw;
        self.sums.sumvw += other.sums.sumvw;
        self.sums.sumw2 += other.sums.sumw2;
        self.sums.sumwv2 += other.sums.sumwv2;
    }

    /// Zero the running sums and the derived values, keeping the error mode
    pub fn clear(&mut self) {
        self.sums = WeightedSums::default();
        self.average = 0.0;
        self.error = 0.0;
    }

    /// Kish effective sample size, (Σw)²/Σw². Zero when Σw² is zero.
    pub fn effective_entries(&self) -> f64 {
        if self.sums.sumw2 == 0.0 {
            return 0.0;
        }
        self.sums.sumw * self.sums.sumw / self.sums.sumw2
    }

    /// Sum of weights
    pub fn entries(&self) -> f64 {
        self.sums.sumw
    }

    /// Sum of squared weights
    pub fn sumw2(&self) -> f64 {
        self.sums.sumw2
    }

    /// Sum of weight × value
    pub fn sumvw(&self) -> f64 {
        self.sums.sumvw
    }

    /// Sum of weight × value²
    pub fn sumwv2(&self) -> f64 {
        self.sums.sumwv2
    }

    /// The running sums
    pub fn sums(&self) -> WeightedSums {
        self.sums
    }

    /// Cached weighted average
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Cached error
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// Change the error mode and recompute the error
    pub fn set_error_mode(&mut self, mode: ErrorMode) {
        self.error_mode = mode;
        self.update_error();
    }

    /// True when nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.sums == WeightedSums::default()
    }
}

/// Fill `(value, weight)` pairs
impl Extend<(f64, f64)> for StatBin {
    fn extend<T: IntoIterator<Item = (f64, f64)>>(&mut self, iter: T) {
        for (value, weight) in iter {
            self.fill(value, weight);
        }
    }
}

/// Collect unit-weight values
impl FromIterator<f64> for StatBin {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> StatBin {
        let mut bin = StatBin::default();
        bin.extend(iter.into_iter().map(|v| (v, 1.0)));
        bin
    }
}
