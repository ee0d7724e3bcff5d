//! Overflow regions around the profile domain
//!
//! Points are classified on a 3×3 compass grid relative to the x/y domain.
//! The eight outer regions each own an overflow bin; the center is the
//! domain itself and is handled by the regular bin lookup.
//!
//! ```text
//!            x<min   inside   x>max
//!  y>max   |  -1   |   -2   |  -3   |
//!  inside  |  -4   |   -5   |  -6   |
//!  y<min   |  -7   |   -8   |  -9   |
//! ```
//!
//! The integer codes double as the negative bin indices of the overflow
//! slots in the profile accessors.

use polyprof_stats::{ErrorMode, StatBin};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of overflow slots, center included
pub const OVERFLOW_SLOTS: usize = 9;

/// Region of the plane relative to the profile domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum OverflowRegion {
    NorthWest,
    North,
    NorthEast,
    West,
    /// Inside the x/y domain
    Inside,
    East,
    SouthWest,
    South,
    SouthEast,
    /// The profile has no bins yet
    Unconfigured,
}

impl OverflowRegion {
    /// All nine regions in slot order
    pub const ALL: [OverflowRegion; OVERFLOW_SLOTS] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::Inside,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Classify a point against closed x and y ranges
    pub fn classify(x: f64, y: f64, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        let row = if y > y_range.1 {
            0
        } else if y >= y_range.0 {
            1
        } else {
            2
        };
        let column = if x > x_range.1 {
            2
        } else if x >= x_range.0 {
            1
        } else {
            0
        };
        Self::ALL[row * 3 + column]
    }

    /// Position in the overflow bin array, `None` for `Unconfigured`
    pub fn slot(self) -> Option<usize> {
        Self::ALL.iter().position(|&region| region == self)
    }

    /// Legacy integer code: -1..=-9 for the compass regions, 0 when unconfigured
    pub fn code(self) -> i32 {
        self.slot().map_or(0, |slot| -(slot as i32) - 1)
    }

    /// Inverse of [`OverflowRegion::code`]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unconfigured),
            -9..=-1 => Some(Self::ALL[(-code - 1) as usize]),
            _ => None,
        }
    }

    /// True for the eight regions outside the domain
    pub fn is_overflow(self) -> bool {
        !matches!(self, Self::Inside | Self::Unconfigured)
    }
}

impl fmt::Display for OverflowRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::NorthWest => "north-west",
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::West => "west",
            Self::Inside => "inside",
            Self::East => "east",
            Self::SouthWest => "south-west",
            Self::South => "south",
            Self::SouthEast => "south-east",
            Self::Unconfigured => "unconfigured",
        };
        f.write_str(name)
    }
}

/// The nine geometry-less overflow bins of a profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverflowBins {
    bins: [StatBin; OVERFLOW_SLOTS],
}

impl OverflowBins {
    pub fn new(error_mode: ErrorMode) -> Self {
        Self {
            bins: std::array::from_fn(|_| StatBin::with_error_mode(error_mode)),
        }
    }

    /// Fill the bin of an outside region. `Inside` and `Unconfigured` are
    /// ignored.
    pub fn fill(&mut self, region: OverflowRegion, value: f64, weight: f64) {
        if !region.is_overflow() {
            return;
        }
        if let Some(slot) = region.slot() {
            self.bins[slot].fill(value, weight);
        }
    }

    pub fn get(&self, region: OverflowRegion) -> Option<&StatBin> {
        region.slot().map(|slot| &self.bins[slot])
    }

    /// Bin by slot position (0..9)
    pub fn slot(&self, slot: usize) -> Option<&StatBin> {
        self.bins.get(slot)
    }

    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut StatBin> {
        self.bins.get_mut(slot)
    }

    /// Sum the running sums of another set slot by slot
    pub fn merge(&mut self, other: &OverflowBins) {
        for (dst, src) in self.bins.iter_mut().zip(other.bins.iter()) {
            dst.merge(src);
        }
    }

    pub fn update(&mut self) {
        self.bins.iter_mut().for_each(StatBin::update);
    }

    pub fn clear(&mut self) {
        self.bins.iter_mut().for_each(StatBin::clear);
    }

    pub fn set_error_mode(&mut self, mode: ErrorMode) {
        for bin in &mut self.bins {
            bin.set_error_mode(mode);
        }
    }

    /// Entries of every slot arranged as the compass table
    pub fn table(&self) -> OverflowTable {
        let mut entries = [[0.0; 3]; 3];
        for (slot, bin) in self.bins.iter().enumerate() {
            entries[slot / 3][slot % 3] = bin.entries();
        }
        OverflowTable { entries }
    }
}

/// Summed weights of the overflow slots, laid out north row first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverflowTable {
    pub entries: [[f64; 3]; 3],
}

impl OverflowTable {
    pub fn total(&self) -> f64 {
        self.entries.iter().flatten().sum()
    }
}

impl fmt::Display for OverflowTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.entries {
            writeln!(f, "\t{}\t\t{}\t\t{}\t", row[0], row[1], row[2])?;
        }
        write!(f, "Total: {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: (f64, f64) = (0.0, 10.0);
    const Y: (f64, f64) = (0.0, 5.0);

    #[test]
    fn test_classify_compass() {
        assert_eq!(OverflowRegion::classify(-1.0, 6.0, X, Y), OverflowRegion::NorthWest);
        assert_eq!(OverflowRegion::classify(5.0, 6.0, X, Y), OverflowRegion::North);
        assert_eq!(OverflowRegion::classify(11.0, 6.0, X, Y), OverflowRegion::NorthEast);
        assert_eq!(OverflowRegion::classify(-1.0, 2.0, X, Y), OverflowRegion::West);
        assert_eq!(OverflowRegion::classify(5.0, 2.0, X, Y), OverflowRegion::Inside);
        assert_eq!(OverflowRegion::classify(11.0, 2.0, X, Y), OverflowRegion::East);
        assert_eq!(OverflowRegion::classify(-1.0, -1.0, X, Y), OverflowRegion::SouthWest);
        assert_eq!(OverflowRegion::classify(5.0, -1.0, X, Y), OverflowRegion::South);
        assert_eq!(OverflowRegion::classify(11.0, -1.0, X, Y), OverflowRegion::SouthEast);
    }

    #[test]
    fn test_boundaries_are_inside() {
        for (x, y) in [(0.0, 0.0), (10.0, 5.0), (0.0, 5.0), (10.0, 0.0)] {
            assert_eq!(OverflowRegion::classify(x, y, X, Y), OverflowRegion::Inside);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(OverflowRegion::NorthWest.code(), -1);
        assert_eq!(OverflowRegion::Inside.code(), -5);
        assert_eq!(OverflowRegion::SouthEast.code(), -9);
        assert_eq!(OverflowRegion::Unconfigured.code(), 0);

        for region in OverflowRegion::ALL {
            assert_eq!(OverflowRegion::from_code(region.code()), Some(region));
        }
        assert_eq!(OverflowRegion::from_code(-10), None);
        assert_eq!(OverflowRegion::from_code(1), None);
    }

    #[test]
    fn test_fill_ignores_inside() {
        let mut bins = OverflowBins::default();
        bins.fill(OverflowRegion::Inside, 1.0, 1.0);
        bins.fill(OverflowRegion::Unconfigured, 1.0, 1.0);
        bins.fill(OverflowRegion::East, 4.0, 2.0);

        let table = bins.table();
        assert_eq!(table.entries[1], [0.0, 0.0, 2.0]);
        assert_eq!(table.total(), 2.0);
        assert_eq!(bins.get(OverflowRegion::East).unwrap().average(), 4.0);
    }

    #[test]
    fn test_table_display() {
        let mut bins = OverflowBins::default();
        bins.fill(OverflowRegion::North, 1.0, 3.0);
        let text = bins.table().to_string();

        assert!(text.ends_with("Total: 3"));
        assert_eq!(text.lines().count(), 4);
    }
}
