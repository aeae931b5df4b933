//! One sample per supervised region

use super::base::DatasetBase;
use super::sample::Sample;
use super::Dataset;
use crate::config::DatasetConfig;
use crate::error::Result;

/// Dataset yielding each supervised row as-is
#[derive(Debug, Clone)]
pub struct GeneralDataset {
    base: DatasetBase,
}

impl GeneralDataset {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        Ok(Self { base: DatasetBase::new(config)? })
    }
}

impl Dataset for GeneralDataset {
    fn len(&self) -> usize {
        self.base.len()
    }

    fn get(&self, index: usize) -> Option<Sample> {
        self.base.sample(index)
    }

    fn config(&self) -> &DatasetConfig {
        &self.base.config
    }

    fn ignored(&self) -> &[String] {
        self.base.ignored()
    }
}
