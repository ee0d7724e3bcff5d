//! Profile-wide accumulators
//!
//! Sums over every fill, in-domain or not, from which the mean and spread
//! along x, y and the sampled value can be reconstructed without visiting
//! the bins.

use serde::{Deserialize, Serialize};

/// Axis of a profile fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Axis {
    X,
    Y,
    /// The sampled value
    Z,
}

/// Weighted sums over all fills of a profile
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct GlobalStats {
    pub sumw: f64,
    pub sumw2: f64,
    pub sumwx: f64,
    pub sumwx2: f64,
    pub sumwy: f64,
    pub sumwy2: f64,
    pub sumwxy: f64,
    pub sumwz: f64,
    pub sumwz2: f64,
}

impl GlobalStats {
    pub fn fill(&mut self, x: f64, y: f64, z: f64, w: f64) {
        self.sumw += w;
        self.sumw2 += w * w;
        self.sumwx += w * x;
        self.sumwx2 += w * x * x;
        self.sumwy += w * y;
        self.sumwy2 += w * y * y;
        self.sumwxy += w * x * y;
        self.sumwz += w * z;
        self.sumwz2 += w * z * z;
    }

    pub fn merge(&mut self, other: &GlobalStats) {
        self.sumw += other.sumw;
        self.sumw2 += other.sumw2;
        self.sumwx += other.sumwx;
        self.sumwx2 += other.sumwx2;
        self.sumwy += other.sumwy;
        self.sumwy2 += other.sumwy2;
        self.sumwxy += other.sumwxy;
        self.sumwz += other.sumwz;
        self.sumwz2 += other.sumwz2;
    }

    /// `[Σw, Σw², Σwx, Σwx², Σwy, Σwy², Σwxy, Σwz, Σwz²]`
    pub fn to_array(&self) -> [f64; 9] {
        [
            self.sumw,
            self.sumw2,
            self.sumwx,
            self.sumwx2,
            self.sumwy,
            self.sumwy2,
            self.sumwxy,
            self.sumwz,
            self.sumwz2,
        ]
    }

    pub fn from_array(stats: [f64; 9]) -> Self {
        let [sumw, sumw2, sumwx, sumwx2, sumwy, sumwy2, sumwxy, sumwz, sumwz2] = stats;
        Self {
            sumw,
            sumw2,
            sumwx,
            sumwx2,
            sumwy,
            sumwy2,
            sumwxy,
            sumwz,
            sumwz2,
        }
    }

    fn moments(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.sumwx, self.sumwx2),
            Axis::Y => (self.sumwy, self.sumwy2),
            Axis::Z => (self.sumwz, self.sumwz2),
        }
    }

    /// Weighted mean along an axis, 0 without weight
    pub fn mean(&self, axis: Axis) -> f64 {
        if self.sumw == 0.0 {
            return 0.0;
        }
        self.moments(axis).0 / self.sumw
    }

    /// Weighted standard deviation along an axis, 0 without weight
    pub fn std_dev(&self, axis: Axis) -> f64 {
        if self.sumw == 0.0 {
            return 0.0;
        }
        let mean = self.mean(axis);
        (self.moments(axis).1 / self.sumw - mean * mean).abs().sqrt()
    }

    /// Weighted covariance of x and y
    pub fn covariance(&self) -> f64 {
        if self.sumw == 0.0 {
            return 0.0;
        }
        self.sumwxy / self.sumw - self.mean(Axis::X) * self.mean(Axis::Y)
    }

    /// Correlation factor of x and y, 0 when either spread is zero
    pub fn correlation(&self) -> f64 {
        let denom = self.std_dev(Axis::X) * self.std_dev(Axis::Y);
        if denom == 0.0 {
            return 0.0;
        }
        self.covariance() / denom
    }

    /// Kish effective number of fills
    pub fn effective_entries(&self) -> f64 {
        if self.sumw2 == 0.0 {
            return 0.0;
        }
        self.sumw * self.sumw / self.sumw2
    }
}
