//! State shared by every dataset implementation

use super::sample::{Perturbation, Sample};
use super::supervised::{SupervisedRow, SupervisedTable};
use crate::config::{DatasetConfig, IgnoreObject, PerturbationMode, ValidationError};
use crate::error::{DatasetError, Result};

/// Validated config plus the parsed supervised table
#[derive(Debug, Clone)]
pub(crate) struct DatasetBase {
    pub(crate) config: DatasetConfig,
    pub(crate) table: SupervisedTable,
    perturbation: Option<Perturbation>,
    ignored: Vec<String>,
}

impl DatasetBase {
    pub(crate) fn new(config: DatasetConfig) -> Result<Self> {
        config.validate()?;

        let supervised = config.supervised_file.as_ref().ok_or_else(|| {
            DatasetError::MissingRequiredField { field: "supervised_file".to_string() }
        })?;
        let table = SupervisedTable::read(supervised)?;

        let perturbation = if config.perturbation {
            let value =
                config.perturbation_value.ok_or(ValidationError::MissingPerturbationValue)?;
            let mode = PerturbationMode::from_value(value)
                .ok_or(ValidationError::InvalidPerturbationValue(i64::from(value)))?;
            let objects = config
                .perturbation_object
                .as_deref()
                .map(split_objects)
                .unwrap_or_default();
            Some(Perturbation { mode, objects })
        } else {
            None
        };

        let ignored = if config.ignore {
            config.ignore_object.as_ref().map(IgnoreObject::to_vec).unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self { config, table, perturbation, ignored })
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn row(&self, index: usize) -> Option<&SupervisedRow> {
        self.table.rows().get(index)
    }

    pub(crate) fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// Sample with region, label and perturbation filled in
    pub(crate) fn sample(&self, index: usize) -> Option<Sample> {
        let row = self.row(index)?;
        Some(Sample {
            index,
            region: row.region(),
            label: row.label,
            flank_indices: None,
            prompt: None,
            perturbation: self.perturbation.clone(),
        })
    }
}

fn split_objects(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
