//! Samples spanning a window of neighbouring regions

use super::base::DatasetBase;
use super::sample::Sample;
use super::Dataset;
use crate::config::DatasetConfig;
use crate::error::Result;

/// Dataset whose samples carry `build_region_index ± flank_window`
#[derive(Debug, Clone)]
pub struct MultiFlankwindowDataset {
    base: DatasetBase,
}

impl MultiFlankwindowDataset {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        Ok(Self { base: DatasetBase::new(config)? })
    }

    #[must_use]
    pub fn flank_window(&self) -> usize {
        self.base.config.flank_window
    }
}

/// Region indices of the window centred on `center`, clamped at zero
#[must_use]
pub fn flank_indices(center: u64, flank_window: usize) -> Vec<u64> {
    let flank = flank_window as u64;
    (center.saturating_sub(flank)..=center.saturating_add(flank)).collect()
}

impl Dataset for MultiFlankwindowDataset {
    fn len(&self) -> usize {
        self.base.len()
    }

    fn get(&self, index: usize) -> Option<Sample> {
        let mut sample = self.base.sample(index)?;
        sample.flank_indices =
            Some(flank_indices(sample.region.build_region_index, self.flank_window()));
        Some(sample)
    }

    fn config(&self) -> &DatasetConfig {
        &self.base.config
    }

    fn ignored(&self) -> &[String] {
        self.base.ignored()
    }
}
