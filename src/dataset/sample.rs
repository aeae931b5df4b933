//! Items yielded by datasets

use std::path::PathBuf;

use crate::config::{PerturbationMode, PromptKind};

/// Genomic region of a supervised row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    /// Row index of the region in the reference cistrome matrix
    pub build_region_index: u64,
}

/// Prompt attached to a [`Sample`] by a prompt dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Expression or cistrome prompt
    Profile { kind: PromptKind, regulator: String, celltype: String },
    /// DNA sequence prompt read from a FASTA file
    Dna { fasta_file: PathBuf },
}

/// Regulator perturbation requested for a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perturbation {
    pub mode: PerturbationMode,
    /// Regulators or sample ids, split from `perturbation_object`
    pub objects: Vec<String>,
}

/// One dataset item
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Position in the dataset
    pub index: usize,
    pub region: Region,
    pub label: Option<f64>,
    /// Neighbouring region indices, multi-window datasets only
    pub flank_indices: Option<Vec<u64>>,
    pub prompt: Option<Prompt>,
    pub perturbation: Option<Perturbation>,
}
