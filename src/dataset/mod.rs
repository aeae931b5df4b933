//! Datasets built from a [`DatasetConfig`](crate::config::DatasetConfig)
//!
//! The factory methods [`DatasetConfig::init_dataset`] and
//! [`DatasetConfig::init_dataloader`] pick the implementation from the
//! config's `kind`.
//!
//! [`DatasetConfig::init_dataset`]: crate::config::DatasetConfig::init_dataset
//! [`DatasetConfig::init_dataloader`]: crate::config::DatasetConfig::init_dataloader

mod base;
mod factory;
mod general;
mod loader;
mod multi_flank;
mod prompt;
mod sample;
mod supervised;

#[cfg(test)]
mod tests;

pub use factory::AnyDataset;
pub use general::GeneralDataset;
pub use loader::{Batches, DataLoader};
pub use multi_flank::{flank_indices, MultiFlankwindowDataset};
pub use prompt::PromptDataset;
pub use sample::{Perturbation, Prompt, Region, Sample};
pub use supervised::{SupervisedRow, SupervisedTable};

use crate::config::DatasetConfig;

/// Random-access collection of samples
pub trait Dataset: Send + Sync {
    /// Number of samples
    fn len(&self) -> usize;

    /// Sample at `index`, `None` when out of range
    fn get(&self, index: usize) -> Option<Sample>;

    /// Config the dataset was built from
    fn config(&self) -> &DatasetConfig;

    /// Regulators or sample ids excluded from the input; empty unless
    /// `ignore` is set
    fn ignored(&self) -> &[String];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
