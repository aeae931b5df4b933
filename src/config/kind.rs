//! Discriminator and enumerated field types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validate::ValidationError;

/// Dataset implementation selected by a config's `kind` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Accepted by validation but has no dataset implementation
    BasicDataset,
    /// One sample per supervised region
    GeneralDataset,
    /// Samples carry a window of neighbouring regions
    MultiFlankwindowDataset,
    /// Samples carry a regulator/cell-type or DNA prompt
    PromptDataset,
}

impl DatasetKind {
    /// Every value accepted by validation, in wire form
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::BasicDataset,
        DatasetKind::GeneralDataset,
        DatasetKind::MultiFlankwindowDataset,
        DatasetKind::PromptDataset,
    ];

    /// Wire name as written in config JSON
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BasicDataset => "BasicDataset",
            Self::GeneralDataset => "GeneralDataset",
            Self::MultiFlankwindowDataset => "MultiFlankwindowDataset",
            Self::PromptDataset => "PromptDataset",
        }
    }

    /// Wire names of every accepted kind
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidKind(s.to_string()))
    }
}

/// Source of the prompt signal fed to a [`DatasetKind::PromptDataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Cell-type expression profile
    Expression,
    /// Cistrome (e.g. ATAC or ChIP) profile
    Cistrome,
    /// Raw DNA sequence from a FASTA file
    Dna,
}

impl PromptKind {
    /// Wire name as written in config JSON
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::Cistrome => "cistrome",
            Self::Dna => "dna",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expression" => Ok(Self::Expression),
            "cistrome" => Ok(Self::Cistrome),
            "dna" => Ok(Self::Dna),
            other => Err(ValidationError::InvalidPromptKind(other.to_string())),
        }
    }
}

/// Regulators or sample ids excluded from the reference cistromes
///
/// Accepts a single string (`"ctcf"`) or a list (`["ctcf", "ep300"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IgnoreObject {
    One(String),
    Many(Vec<String>),
}

impl IgnoreObject {
    /// Flatten into individual identifiers
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s.clone()],
            Self::Many(v) => v.clone(),
        }
    }
}

/// Regulator perturbation applied at dataset construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerturbationMode {
    Knockout,
    Overexpression,
}

impl PerturbationMode {
    /// Map the stored `perturbation_value` (0 or 1)
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Knockout),
            1 => Some(Self::Overexpression),
            _ => None,
        }
    }
}
