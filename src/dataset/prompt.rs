//! Samples conditioned on an expression, cistrome or DNA prompt

use super::base::DatasetBase;
use super::sample::{Prompt, Sample};
use super::Dataset;
use crate::config::{DatasetConfig, PromptKind};
use crate::error::{DatasetError, Result};

/// Dataset attaching a [`Prompt`] to every sample
///
/// For expression and cistrome prompts, the regulator and cell type of each
/// row come from the supervised file's `regulator`/`celltype` columns, falling
/// back to `prompt_regulator`/`prompt_celltype` from the config.
#[derive(Debug, Clone)]
pub struct PromptDataset {
    base: DatasetBase,
    prompts: Vec<Prompt>,
}

impl PromptDataset {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let base = DatasetBase::new(config)?;
        let kind = base.config.prompt_kind.ok_or_else(|| missing("prompt_kind"))?;

        let prompts = match kind {
            PromptKind::Dna => {
                let fasta_file =
                    base.config.fasta_file.clone().ok_or_else(|| missing("fasta_file"))?;
                vec![Prompt::Dna { fasta_file }; base.len()]
            }
            PromptKind::Expression | PromptKind::Cistrome => base
                .table
                .rows()
                .iter()
                .map(|row| -> Result<Prompt> {
                    let regulator = row
                        .regulator
                        .clone()
                        .or_else(|| base.config.prompt_regulator.clone())
                        .ok_or_else(|| missing("prompt_regulator"))?;
                    let celltype = row
                        .celltype
                        .clone()
                        .or_else(|| base.config.prompt_celltype.clone())
                        .ok_or_else(|| missing("prompt_celltype"))?;
                    Ok(Prompt::Profile { kind, regulator, celltype })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self { base, prompts })
    }

    #[must_use]
    pub fn prompt_kind(&self) -> Option<PromptKind> {
        self.base.config.prompt_kind
    }
}

fn missing(field: &str) -> DatasetError {
    DatasetError::MissingRequiredField { field: field.to_string() }
}

impl Dataset for PromptDataset {
    fn len(&self) -> usize {
        self.base.len()
    }

    fn get(&self, index: usize) -> Option<Sample> {
        let mut sample = self.base.sample(index)?;
        sample.prompt = self.prompts.get(index).cloned();
        Some(sample)
    }

    fn config(&self) -> &DatasetConfig {
        &self.base.config
    }

    fn ignored(&self) -> &[String] {
        self.base.ignored()
    }
}
