//! Build datasets and dataloaders from a config's `kind`

use super::general::GeneralDataset;
use super::loader::DataLoader;
use super::multi_flank::MultiFlankwindowDataset;
use super::prompt::PromptDataset;
use super::sample::Sample;
use super::Dataset;
use crate::config::{DatasetConfig, DatasetKind, Overrides};
use crate::error::{DatasetError, Result};

/// Any dataset the factory can build
#[derive(Debug, Clone)]
pub enum AnyDataset {
    General(GeneralDataset),
    MultiFlankwindow(MultiFlankwindowDataset),
    Prompt(PromptDataset),
}

impl AnyDataset {
    #[must_use]
    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::General(_) => DatasetKind::GeneralDataset,
            Self::MultiFlankwindow(_) => DatasetKind::MultiFlankwindowDataset,
            Self::Prompt(_) => DatasetKind::PromptDataset,
        }
    }
}

impl Dataset for AnyDataset {
    fn len(&self) -> usize {
        match self {
            Self::General(ds) => ds.len(),
            Self::MultiFlankwindow(ds) => ds.len(),
            Self::Prompt(ds) => ds.len(),
        }
    }

    fn get(&self, index: usize) -> Option<Sample> {
        match self {
            Self::General(ds) => ds.get(index),
            Self::MultiFlankwindow(ds) => ds.get(index),
            Self::Prompt(ds) => ds.get(index),
        }
    }

    fn config(&self) -> &DatasetConfig {
        match self {
            Self::General(ds) => ds.config(),
            Self::MultiFlankwindow(ds) => ds.config(),
            Self::Prompt(ds) => ds.config(),
        }
    }

    fn ignored(&self) -> &[String] {
        match self {
            Self::General(ds) => ds.ignored(),
            Self::MultiFlankwindow(ds) => ds.ignored(),
            Self::Prompt(ds) => ds.ignored(),
        }
    }
}

impl DatasetConfig {
    /// Build the dataset selected by `kind` from a copy with `overrides` applied
    pub fn init_dataset(&self, overrides: Overrides) -> Result<AnyDataset> {
        self.init_dataset_with_config(overrides).map(|(dataset, _)| dataset)
    }

    /// Like [`init_dataset`](Self::init_dataset), also returning the config used
    ///
    /// `BasicDataset` passes validation but has no implementation and fails
    /// with [`DatasetError::UnsupportedKind`].
    pub fn init_dataset_with_config(
        &self,
        overrides: Overrides,
    ) -> Result<(AnyDataset, DatasetConfig)> {
        let config = self.clone_with(overrides)?;
        let dataset = match config.kind {
            Some(DatasetKind::GeneralDataset) => {
                AnyDataset::General(GeneralDataset::new(config.clone())?)
            }
            Some(DatasetKind::MultiFlankwindowDataset) => {
                AnyDataset::MultiFlankwindow(MultiFlankwindowDataset::new(config.clone())?)
            }
            Some(DatasetKind::PromptDataset) => {
                AnyDataset::Prompt(PromptDataset::new(config.clone())?)
            }
            Some(DatasetKind::BasicDataset) | None => {
                return Err(DatasetError::UnsupportedKind {
                    kind: config.kind.map_or("None", DatasetKind::as_str).to_string(),
                });
            }
        };
        tracing::debug!(kind = %dataset.kind(), samples = dataset.len(), "dataset initialized");
        Ok((dataset, config))
    }

    /// Build the dataset and wrap it in a [`DataLoader`] using the resolved
    /// `batch_size`, `shuffle` and `num_workers`
    pub fn init_dataloader(&self, overrides: Overrides) -> Result<DataLoader<AnyDataset>> {
        let (dataset, config) = self.init_dataset_with_config(overrides)?;
        DataLoader::new(dataset, config.batch_size, config.shuffle, config.num_workers)
    }
}
