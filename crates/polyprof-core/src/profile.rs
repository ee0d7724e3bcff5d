//! Polygon-binned profile
//!
//! A `PolyProfile` is a 2D histogram whose bins are arbitrary shapes. Each
//! bin keeps running weighted statistics of a sampled value, so the content
//! of a bin is the average of the values that fell inside it.
//!
//! # Filling
//!
//! Every fill updates the global accumulators and, for points outside the
//! domain, one of the eight compass overflow bins. The point is then looked
//! up in the super-grid cell that contains it and every candidate bin whose
//! geometry contains the point receives the value.
//!
//! # Merging
//!
//! Profiles with the same bins, filled independently, are combined with
//! [`PolyProfile::merge`]. Bins are matched by position and only running
//! sums are added; averages and errors are recomputed afterwards.

use std::sync::Arc;

use polyprof_stats::{ErrorMode, StatBin};
use serde::{Deserialize, Serialize};

use crate::config::ProfileConfig;
use crate::error::{ProfileError, ProfileResult};
use crate::global::GlobalStats;
use crate::overflow::{OverflowBins, OverflowRegion, OverflowTable, OVERFLOW_SLOTS};
use crate::spatial::{BinGeometry, BoundingBox, CellGrid};

/// One weighted sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub weight: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, value: f64, weight: f64) -> Self {
        Self {
            x,
            y,
            value,
            weight,
        }
    }

    /// Sample with unit weight
    pub fn unit(x: f64, y: f64, value: f64) -> Self {
        Self::new(x, y, value, 1.0)
    }
}

/// What the displayed content of a bin shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ContentMode {
    #[default]
    Average,
    Error,
}

/// Exported statistics of one bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BinSummary {
    /// 1-based bin index
    pub index: u64,
    pub average: f64,
    pub error: f64,
    pub entries: f64,
}

/// A polygon bin owned by a profile
#[derive(Debug, Clone)]
pub struct ProfileBin {
    index: usize,
    geometry: Arc<dyn BinGeometry>,
    stats: StatBin,
    content: f64,
}

impl ProfileBin {
    /// 1-based index, stable for the lifetime of the profile
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn geometry(&self) -> &dyn BinGeometry {
        self.geometry.as_ref()
    }

    pub fn stats(&self) -> &StatBin {
        &self.stats
    }

    /// Displayed content. Fills and merges show the average; an error
    /// snapshot from [`PolyProfile::set_content_mode`] lasts until then.
    pub fn content(&self) -> f64 {
        self.content
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.geometry.contains(x, y)
    }

    fn refresh_content(&mut self, mode: ContentMode) {
        self.content = match mode {
            ContentMode::Average => self.stats.average(),
            ContentMode::Error => self.stats.error(),
        };
    }

    fn summary(&self) -> BinSummary {
        BinSummary {
            index: self.index as u64,
            average: self.stats.average(),
            error: self.stats.error(),
            entries: self.stats.entries(),
        }
    }
}

/// 2D profile with polygon bins
#[derive(Debug, Clone)]
pub struct PolyProfile {
    domain: BoundingBox,
    grid: CellGrid,
    bins: Vec<ProfileBin>,
    overflow: OverflowBins,
    stats: GlobalStats,
    entries: u64,
    error_mode: ErrorMode,
    content_mode: ContentMode,
}

impl PolyProfile {
    /// Profile over the given domain with the default 25×25 lookup grid
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> ProfileResult<Self> {
        Self::with_config(ProfileConfig::new(x_min, x_max, y_min, y_max))
    }

    /// Profile with an explicit number of grid cells along each axis
    pub fn with_cells(
        cells_x: u32,
        x_min: f64,
        x_max: f64,
        cells_y: u32,
        y_min: f64,
        y_max: f64,
    ) -> ProfileResult<Self> {
        Self::with_config(ProfileConfig::new(x_min, x_max, y_min, y_max).with_cells(cells_x, cells_y))
    }

    pub fn with_config(config: ProfileConfig) -> ProfileResult<Self> {
        config.validate()?;

        let domain = BoundingBox::new(config.x_min, config.y_min, config.x_max, config.y_max);
        Ok(Self {
            domain,
            grid: CellGrid::new(&domain, config.cells_x as usize, config.cells_y as usize),
            bins: Vec::new(),
            overflow: OverflowBins::new(config.error_mode),
            stats: GlobalStats::default(),
            entries: 0,
            error_mode: config.error_mode,
            content_mode: ContentMode::default(),
        })
    }

    /// The configuration this profile would be rebuilt from
    pub fn config(&self) -> ProfileConfig {
        ProfileConfig {
            x_min: self.domain.x_min,
            x_max: self.domain.x_max,
            y_min: self.domain.y_min,
            y_max: self.domain.y_max,
            cells_x: self.grid.cells_x() as u32,
            cells_y: self.grid.cells_y() as u32,
            error_mode: self.error_mode,
        }
    }

    pub fn domain(&self) -> BoundingBox {
        self.domain
    }

    /// Register a new bin and return it. Indices start at 1.
    pub fn add_bin(&mut self, geometry: impl BinGeometry + 'static) -> &ProfileBin {
        self.add_shared_bin(Arc::new(geometry))
    }

    /// Register a bin whose geometry is shared with other profiles
    pub fn add_shared_bin(&mut self, geometry: Arc<dyn BinGeometry>) -> &ProfileBin {
        let position = self.bins.len();
        let bbox = geometry.bounding_box();
        self.grid.insert(position, &bbox);

        tracing::debug!(
            "Added bin {} with bounds [{}, {}]x[{}, {}]",
            position + 1,
            bbox.x_min,
            bbox.x_max,
            bbox.y_min,
            bbox.y_max
        );

        self.bins.push(ProfileBin {
            index: position + 1,
            geometry,
            stats: StatBin::with_error_mode(self.error_mode),
            content: 0.0,
        });
        &self.bins[position]
    }

    /// Register a rectangular bin
    pub fn add_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &ProfileBin {
        self.add_bin(BoundingBox::new(x1, y1, x2, y2))
    }

    pub fn number_of_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn bins(&self) -> &[ProfileBin] {
        &self.bins
    }

    /// Bin by 1-based index
    pub fn bin(&self, index: usize) -> Option<&ProfileBin> {
        index.checked_sub(1).and_then(|position| self.bins.get(position))
    }

    /// Classify a point relative to the domain.
    ///
    /// Returns [`OverflowRegion::Unconfigured`] while the profile has no bins.
    pub fn classify_overflow(&self, x: f64, y: f64) -> OverflowRegion {
        if self.bins.is_empty() {
            return OverflowRegion::Unconfigured;
        }
        OverflowRegion::classify(
            x,
            y,
            (self.domain.x_min, self.domain.x_max),
            (self.domain.y_min, self.domain.y_max),
        )
    }

    /// Fill a value with unit weight
    pub fn fill_unit(&mut self, x: f64, y: f64, value: f64) -> OverflowRegion {
        self.fill(x, y, value, 1.0)
    }

    /// Fill a weighted value at `(x, y)`.
    ///
    /// Every bin containing the point receives the value; a point inside the
    /// domain but outside all bins only counts towards the global sums.
    pub fn fill(&mut self, x: f64, y: f64, value: f64, weight: f64) -> OverflowRegion {
        let region = self.classify_overflow(x, y);
        self.overflow.fill(region, value, weight);

        self.stats.fill(x, y, value, weight);

        for &position in self.grid.candidates(x, y) {
            let bin = &mut self.bins[position];
            if bin.contains(x, y) {
                self.entries += 1;
                bin.stats.fill(value, weight);
                bin.refresh_content(ContentMode::Average);
                self.content_mode = ContentMode::Average;
            }
        }

        region
    }

    pub fn fill_sample(&mut self, sample: Sample) -> OverflowRegion {
        self.fill(sample.x, sample.y, sample.value, sample.weight)
    }

    /// 1-based index of the first bin containing the point
    pub fn find_bin(&self, x: f64, y: f64) -> Option<usize> {
        self.grid
            .candidates(x, y)
            .iter()
            .map(|&position| &self.bins[position])
            .find(|bin| bin.contains(x, y))
            .map(ProfileBin::index)
    }

    /// Add the statistics of other profiles with the same bins.
    ///
    /// Fails without modifying `self` when `profiles` is empty or when any
    /// profile has a different number of bins. Returns the number of
    /// profiles merged.
    pub fn merge<'a, I>(&mut self, profiles: I) -> ProfileResult<usize>
    where
        I: IntoIterator<Item = &'a PolyProfile>,
    {
        let profiles: Vec<&PolyProfile> = profiles.into_iter().collect();
        if profiles.is_empty() {
            tracing::warn!("Merge rejected: no profiles to be merged");
            return Err(ProfileError::EmptyMerge);
        }

        let expected = self.bins.len();
        if let Some(other) = profiles.iter().find(|p| p.bins.len() != expected) {
            tracing::warn!(
                "Merge rejected: bin counts differ ({} vs {})",
                expected,
                other.bins.len()
            );
            return Err(ProfileError::TopologyMismatch {
                expected,
                found: other.bins.len(),
            });
        }

        for profile in &profiles {
            self.entries += profile.entries;
            self.stats.merge(&profile.stats);
            self.overflow.merge(&profile.overflow);
        }

        for (position, dst) in self.bins.iter_mut().enumerate() {
            for profile in &profiles {
                dst.stats.merge(&profile.bins[position].stats);
            }
            dst.stats.update();
        }
        self.overflow.update();
        self.set_content_mode(ContentMode::Average);

        tracing::info!(
            "Merged {} profiles into profile with {} bins",
            profiles.len(),
            expected
        );
        Ok(profiles.len())
    }

    /// Apply an error mode to all bins, including those added later
    pub fn set_error_mode(&mut self, mode: ErrorMode) {
        self.error_mode = mode;
        for bin in &mut self.bins {
            bin.stats.set_error_mode(mode);
            bin.refresh_content(self.content_mode);
        }
        self.overflow.set_error_mode(mode);
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// Change the error mode of a single bin, addressed like the accessors
    /// (1-based bins, -1..=-9 overflow slots). Other indices are ignored.
    pub fn set_bin_error_mode(&mut self, bin: i32, mode: ErrorMode) {
        match bin {
            b if b > 0 => {
                let content_mode = self.content_mode;
                if let Some(target) = self.bins.get_mut(b as usize - 1) {
                    target.stats.set_error_mode(mode);
                    target.refresh_content(content_mode);
                }
            }
            b if b < 0 && b >= -(OVERFLOW_SLOTS as i32) => {
                if let Some(slot) = self.overflow.slot_mut((-b - 1) as usize) {
                    slot.set_error_mode(mode);
                }
            }
            _ => {}
        }
    }

    /// Show averages or errors as bin contents.
    ///
    /// The next fill or merge switches the displayed content back to the
    /// average.
    pub fn set_content_mode(&mut self, mode: ContentMode) {
        self.content_mode = mode;
        for bin in &mut self.bins {
            bin.stats.update();
            bin.refresh_content(mode);
        }
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    /// Clear all statistics, keeping bins and the lookup grid
    pub fn reset(&mut self) {
        for bin in &mut self.bins {
            bin.stats.clear();
            bin.content = 0.0;
        }
        self.overflow.clear();
        self.stats = GlobalStats::default();
        self.entries = 0;
    }

    /// A copy with the same bins and settings but no statistics
    pub fn empty_clone(&self) -> Self {
        let mut profile = self.clone();
        profile.reset();
        profile
    }

    /// Rebuild the lookup grid with new dimensions
    pub fn change_partition(&mut self, cells_x: u32, cells_y: u32) -> ProfileResult<()> {
        let config = self.config().with_cells(cells_x, cells_y);
        config.validate()?;

        let mut grid = CellGrid::new(&self.domain, cells_x as usize, cells_y as usize);
        for (position, bin) in self.bins.iter().enumerate() {
            grid.insert(position, &bin.geometry.bounding_box());
        }
        tracing::debug!(
            "Rebuilt lookup grid as {}x{} with {} registrations",
            cells_x,
            cells_y,
            grid.registrations()
        );
        self.grid = grid;
        Ok(())
    }

    /// Number of successful in-bin fills
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// `[Σw, Σw², Σwx, Σwx², Σwy, Σwy², Σwxy, Σwz, Σwz²]` over all fills
    pub fn stats(&self) -> [f64; 9] {
        self.stats.to_array()
    }

    pub fn global_stats(&self) -> &GlobalStats {
        &self.stats
    }

    pub fn overflow_bin(&self, region: OverflowRegion) -> Option<&StatBin> {
        self.overflow.get(region)
    }

    /// Summed weights of the overflow regions
    pub fn overflow_table(&self) -> OverflowTable {
        self.overflow.table()
    }

    /// `(index, average, error, entries)` of every bin in index order
    pub fn bin_summaries(&self) -> Vec<BinSummary> {
        self.bins.iter().map(ProfileBin::summary).collect()
    }

    // Positive indices address bins (1-based), -1..=-9 the overflow slots.
    fn stat_bin(&self, bin: i32) -> Option<&StatBin> {
        match bin {
            0 => None,
            b if b > 0 => self.bin(b as usize).map(ProfileBin::stats),
            b if b >= -(OVERFLOW_SLOTS as i32) => self.overflow.slot((-b - 1) as usize),
            _ => None,
        }
    }

    fn bin_value(&self, bin: i32, f: impl Fn(&StatBin) -> f64) -> f64 {
        self.stat_bin(bin).map_or(0.0, f)
    }

    /// Sum of weights in a bin
    pub fn bin_entries(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::entries)
    }

    pub fn bin_effective_entries(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::effective_entries)
    }

    /// Sum of squared weights in a bin
    pub fn bin_entries_w2(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::sumw2)
    }

    /// Sum of weight × value in a bin
    pub fn bin_entries_vw(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::sumvw)
    }

    /// Sum of weight × value² in a bin
    pub fn bin_entries_wv2(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::sumwv2)
    }

    pub fn bin_error(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::error)
    }

    pub fn bin_average(&self, bin: i32) -> f64 {
        self.bin_value(bin, StatBin::average)
    }

    /// Displayed content of a bin. Overflow slots show their average.
    pub fn bin_content(&self, bin: i32) -> f64 {
        if bin > 0 {
            return self.bin(bin as usize).map_or(0.0, ProfileBin::content);
        }
        self.bin_average(bin)
    }
}

/// Fill a stream of samples
impl Extend<Sample> for PolyProfile {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        for sample in iter {
            self.fill_sample(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> PolyProfile {
        let mut profile = PolyProfile::with_cells(4, 0.0, 10.0, 4, 0.0, 10.0).unwrap();
        profile.add_rect(0.0, 0.0, 5.0, 5.0);
        profile.add_rect(5.0, 0.0, 10.0, 5.0);
        profile.add_rect(0.0, 5.0, 5.0, 10.0);
        profile.add_rect(5.0, 5.0, 10.0, 10.0);
        profile
    }

    #[test]
    fn test_add_bin_indices() {
        let mut profile = PolyProfile::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(profile.add_rect(0.0, 0.0, 0.5, 1.0).index(), 1);
        assert_eq!(profile.add_rect(0.5, 0.0, 1.0, 1.0).index(), 2);
        assert_eq!(profile.number_of_bins(), 2);
        assert!(profile.bin(0).is_none());
        assert_eq!(profile.bin(2).unwrap().index(), 2);
    }

    #[test]
    fn test_invalid_domain() {
        assert!(matches!(
            PolyProfile::new(1.0, 1.0, 0.0, 1.0),
            Err(ProfileError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fill_single_bin() {
        let mut profile = PolyProfile::new(0.0, 10.0, 0.0, 10.0).unwrap();
        profile.add_rect(0.0, 0.0, 10.0, 10.0);

        assert_eq!(profile.fill(1.0, 1.0, 10.0, 1.0), OverflowRegion::Inside);
        profile.fill_unit(1.0, 1.0, 20.0);

        assert_eq!(profile.bin_average(1), 15.0);
        assert_eq!(profile.bin_entries(1), 2.0);
        assert_eq!(profile.bin_content(1), 15.0);
        assert_eq!(profile.entries(), 2);
    }

    #[test]
    fn test_fill_routes_to_quadrant() {
        let mut profile = quadrants();
        profile.fill(7.0, 2.0, 3.0, 1.0);
        profile.fill(2.0, 8.0, 4.0, 2.0);

        assert_eq!(profile.bin_entries(1), 0.0);
        assert_eq!(profile.bin_entries(2), 1.0);
        assert_eq!(profile.bin_entries(3), 2.0);
        assert_eq!(profile.bin_entries(4), 0.0);
        assert_eq!(profile.find_bin(7.0, 2.0), Some(2));
    }

    #[test]
    fn test_shared_edge_fills_both_bins() {
        let mut profile = quadrants();
        profile.fill(5.0, 2.0, 1.0, 1.0);

        assert_eq!(profile.bin_entries(1), 1.0);
        assert_eq!(profile.bin_entries(2), 1.0);
        assert_eq!(profile.entries(), 2);
    }

    #[test]
    fn test_empty_profile_fill() {
        let mut profile = PolyProfile::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let region = profile.fill(1.0, 1.0, 5.0, 2.0);

        assert_eq!(region, OverflowRegion::Unconfigured);
        assert_eq!(region.code(), 0);
        assert_eq!(profile.entries(), 0);
        assert_eq!(profile.stats()[0], 2.0);
        assert_eq!(profile.overflow_table().total(), 0.0);
    }

    #[test]
    fn test_far_overflow() {
        let mut profile = quadrants();
        let region = profile.fill(1010.0, 3.0, 8.0, 1.0);

        assert_eq!(region, OverflowRegion::East);
        assert_eq!(profile.bin_entries(-6), 1.0);
        assert_eq!(profile.bin_average(-6), 8.0);
        assert!((1..=4).all(|bin| profile.bin_entries(bin) == 0.0));
        assert_eq!(profile.entries(), 0);
        assert_eq!(profile.stats()[0], 1.0);
    }

    #[test]
    fn test_inside_domain_outside_bins() {
        let mut profile = PolyProfile::new(0.0, 10.0, 0.0, 10.0).unwrap();
        profile.add_rect(0.0, 0.0, 2.0, 2.0);

        assert_eq!(profile.fill(8.0, 8.0, 1.0, 1.0), OverflowRegion::Inside);
        assert_eq!(profile.bin_entries(1), 0.0);
        assert_eq!(profile.bin_entries(-5), 0.0);
        assert_eq!(profile.overflow_table().total(), 0.0);
        assert_eq!(profile.stats()[0], 1.0);
    }

    #[test]
    fn test_lenient_indices() {
        let mut profile = quadrants();
        profile.fill(1.0, 1.0, 2.0, 1.0);

        for bin in [0, 5, 100, -10, i32::MIN, i32::MAX] {
            assert_eq!(profile.bin_entries(bin), 0.0);
            assert_eq!(profile.bin_error(bin), 0.0);
            assert_eq!(profile.bin_effective_entries(bin), 0.0);
            assert_eq!(profile.bin_content(bin), 0.0);
        }
    }

    #[test]
    fn test_bin_sums() {
        let mut profile = quadrants();
        profile.fill(1.0, 1.0, 3.0, 2.0);

        assert_eq!(profile.bin_entries_w2(1), 4.0);
        assert_eq!(profile.bin_entries_vw(1), 6.0);
        assert_eq!(profile.bin_entries_wv2(1), 18.0);
        assert_eq!(profile.bin_effective_entries(1), 1.0);
    }

    #[test]
    fn test_error_mode_applies_to_new_bins() {
        let mut profile = quadrants();
        profile.set_error_mode(ErrorMode::MeanOfMean);
        profile.add_rect(20.0, 20.0, 30.0, 30.0);

        assert!(profile
            .bins()
            .iter()
            .all(|bin| bin.stats().error_mode() == ErrorMode::MeanOfMean));
    }

    #[test]
    fn test_error_mode_changes_error() {
        let mut profile = quadrants();
        for value in [1.0, 2.0, 3.0, 4.0] {
            profile.fill(1.0, 1.0, value, 1.0);
        }
        let spread = profile.bin_error(1);

        profile.set_error_mode(ErrorMode::MeanOfMean);
        assert!((profile.bin_error(1) - spread / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_content_mode() {
        let mut profile = quadrants();
        profile.fill(1.0, 1.0, 10.0, 1.0);
        profile.fill(1.0, 1.0, 20.0, 1.0);

        profile.set_content_mode(ContentMode::Error);
        assert_eq!(profile.bin_content(1), 5.0);

        profile.set_content_mode(ContentMode::Average);
        assert_eq!(profile.bin_content(1), 15.0);
    }

    #[test]
    fn test_fill_after_error_content_shows_average() {
        let mut profile = PolyProfile::new(0.0, 10.0, 0.0, 10.0).unwrap();
        profile.add_rect(0.0, 0.0, 10.0, 10.0);
        profile.set_content_mode(ContentMode::Error);

        profile.fill(1.0, 1.0, 10.0, 1.0);
        profile.fill(1.0, 1.0, 20.0, 1.0);

        assert_eq!(profile.bin_content(1), 15.0);
        assert_eq!(profile.bin_error(1), 5.0);
        assert_eq!(profile.content_mode(), ContentMode::Average);
    }

    #[test]
    fn test_merge_shows_average() {
        let mut other = quadrants();
        other.fill(1.0, 1.0, 10.0, 1.0);
        other.fill(1.0, 1.0, 20.0, 1.0);

        let mut target = quadrants();
        target.set_content_mode(ContentMode::Error);
        target.merge([&other]).unwrap();

        assert_eq!(target.bin_content(1), 15.0);
        assert_eq!(target.content_mode(), ContentMode::Average);
    }

    #[test]
    fn test_bin_error_mode_is_independent() {
        let mut profile = quadrants();
        profile.set_bin_error_mode(1, ErrorMode::MeanOfMean);
        for value in [1.0, 2.0, 3.0, 4.0] {
            profile.fill(1.0, 1.0, value, 1.0);
            profile.fill(7.0, 1.0, value, 1.0);
        }
        let spread = profile.bin_error(2);
        assert!((profile.bin_error(1) - spread / 2.0).abs() < 1e-12);

        let mut other = profile.empty_clone();
        other.fill(1.0, 1.0, 2.5, 1.0);
        other.fill(7.0, 1.0, 2.5, 1.0);
        profile.merge([&other]).unwrap();

        assert_eq!(profile.bins()[0].stats().error_mode(), ErrorMode::MeanOfMean);
        assert_eq!(profile.bins()[1].stats().error_mode(), ErrorMode::Spread);
        // five values with unit spread
        assert!((profile.bin_error(2) - 1.0).abs() < 1e-12);
        assert!((profile.bin_error(1) - 1.0 / 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_bin_error_mode_overflow_and_invalid_indices() {
        let mut profile = quadrants();
        profile.set_bin_error_mode(-6, ErrorMode::MeanOfMean);
        for bin in [0, 5, -10] {
            profile.set_bin_error_mode(bin, ErrorMode::MeanOfMean);
        }
        profile.fill(20.0, 2.0, 1.0, 1.0);
        profile.fill(20.0, 2.0, 3.0, 1.0);

        let east = profile.overflow_bin(OverflowRegion::East).unwrap();
        assert_eq!(east.error_mode(), ErrorMode::MeanOfMean);
        assert!((profile.bin_error(-6) - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(profile
            .bins()
            .iter()
            .all(|bin| bin.stats().error_mode() == ErrorMode::Spread));
    }

    #[test]
    fn test_reset_keeps_bins() {
        let mut profile = quadrants();
        profile.fill(1.0, 1.0, 10.0, 1.0);
        profile.fill(-5.0, -5.0, 10.0, 1.0);
        profile.reset();

        assert_eq!(profile.number_of_bins(), 4);
        assert_eq!(profile.entries(), 0);
        assert_eq!(profile.bin_entries(1), 0.0);
        assert_eq!(profile.bin_content(1), 0.0);
        assert_eq!(profile.bin_entries(-7), 0.0);
        assert_eq!(profile.stats(), [0.0; 9]);

        profile.fill(6.0, 6.0, 1.0, 1.0);
        assert_eq!(profile.bin_entries(4), 1.0);
    }

    #[test]
    fn test_change_partition_keeps_lookup() {
        let mut profile = quadrants();
        profile.change_partition(1, 1).unwrap();
        profile.fill(7.0, 7.0, 1.0, 1.0);
        assert_eq!(profile.bin_entries(4), 1.0);

        profile.change_partition(50, 3).unwrap();
        profile.fill(2.0, 7.0, 1.0, 1.0);
        assert_eq!(profile.bin_entries(3), 1.0);

        assert!(profile.change_partition(0, 3).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(PolyProfile::with_cells(100_000, 0.0, 1.0, 100_000, 0.0, 1.0).is_err());

        let mut profile = quadrants();
        assert!(profile.change_partition(u32::MAX, 2).is_err());
        profile.fill(7.0, 7.0, 1.0, 1.0);
        assert_eq!(profile.bin_entries(4), 1.0);
    }

    #[test]
    fn test_bin_summaries() {
        let mut profile = quadrants();
        profile.fill(1.0, 1.0, 4.0, 1.0);

        let summaries = profile.bin_summaries();
        assert_eq!(summaries.len(), 4);
        assert_eq!(
            summaries[0],
            BinSummary {
                index: 1,
                average: 4.0,
                error: 0.0,
                entries: 1.0,
            }
        );
        assert_eq!(summaries[3].entries, 0.0);
        assert_eq!(summaries[3].index, 4u64);
    }

    #[test]
    fn test_extend_samples() {
        let mut profile = quadrants();
        profile.extend(vec![
            Sample::unit(1.0, 1.0, 2.0),
            Sample::new(9.0, 9.0, 4.0, 3.0),
            Sample::unit(-1.0, 20.0, 1.0),
        ]);

        assert_eq!(profile.bin_entries(1), 1.0);
        assert_eq!(profile.bin_entries(4), 3.0);
        assert_eq!(profile.bin_entries(-1), 1.0);
        assert_eq!(profile.stats()[0], 5.0);
    }
}
