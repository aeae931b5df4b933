//! Dataset configuration record
//!
//! A flat set of named fields grouped by concern. Field names are the JSON
//! keys accepted by [`DatasetConfig::load`] and [`DatasetConfig::update`];
//! serialization keeps the declaration order below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::kind::{DatasetKind, IgnoreObject, PromptKind};
use super::validate::ValidationError;
use crate::error::{DatasetError, Result};

/// Declared field names, in declaration order
pub const FIELD_NAMES: [&str; 22] = [
    "hdf5_file",
    "supervised_file",
    "kind",
    "meta_file",
    "ignore",
    "ignore_object",
    "batch_size",
    "num_workers",
    "shuffle",
    "pin_memory",
    "perturbation",
    "perturbation_object",
    "perturbation_value",
    "prompt_kind",
    "prompt_regulator",
    "prompt_regulator_cache_file",
    "prompt_celltype",
    "prompt_celltype_cache_file",
    "prompt_regulator_cache_pin_memory",
    "prompt_regulator_cache_limit",
    "fasta_file",
    "flank_window",
];

/// Configuration of a ChromBERT dataset and its dataloader
///
/// Deserializing goes through the same per-field rules as
/// [`DatasetConfig::update`]; the result is not validated.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct DatasetConfig {
    // [general]
    /// Reference cistromes (HDF5)
    pub hdf5_file: Option<PathBuf>,
    /// Samples to run forward on (CSV/TSV)
    pub supervised_file: Option<PathBuf>,
    /// Dataset implementation to build
    pub kind: Option<DatasetKind>,
    /// JSON with preset prompt information
    pub meta_file: Option<PathBuf>,

    // [ignore]
    pub ignore: bool,
    pub ignore_object: Option<IgnoreObject>,

    // [dataloader]
    pub batch_size: usize,
    pub num_workers: usize,
    pub shuffle: bool,
    pub pin_memory: bool,

    // [perturbation]
    pub perturbation: bool,
    /// e.g. `"ep300,crebbp"` or `"GSM1036403,GSM1070124"`
    pub perturbation_object: Option<String>,
    /// 0 for knock-out, 1 for overexpression
    pub perturbation_value: Option<u8>,

    // [prompt]
    pub prompt_kind: Option<PromptKind>,
    /// Regulator prompt such as `"ctcf"`; may come from the supervised file instead
    pub prompt_regulator: Option<String>,
    pub prompt_regulator_cache_file: Option<PathBuf>,
    /// Cell type prompt such as `"k562"`; may come from the supervised file instead
    pub prompt_celltype: Option<String>,
    pub prompt_celltype_cache_file: Option<PathBuf>,
    pub prompt_regulator_cache_pin_memory: bool,
    pub prompt_regulator_cache_limit: usize,

    // [prompt.dna]
    pub fasta_file: Option<PathBuf>,

    // [multi window]
    pub flank_window: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            hdf5_file: None,
            supervised_file: None,
            kind: None,
            meta_file: None,
            ignore: false,
            ignore_object: None,
            batch_size: 8,
            num_workers: 20,
            shuffle: false,
            pin_memory: true,
            perturbation: false,
            perturbation_object: None,
            perturbation_value: Some(0),
            prompt_kind: None,
            prompt_regulator: None,
            prompt_regulator_cache_file: None,
            prompt_celltype: None,
            prompt_celltype_cache_file: None,
            prompt_regulator_cache_pin_memory: false,
            prompt_regulator_cache_limit: 3,
            fasta_file: None,
            flank_window: 0,
        }
    }
}

impl DatasetConfig {
    /// Offset added to quantized signal levels to form token ids
    pub const VOCAB_SHIFT: usize = 5;
    /// Number of quantized signal levels
    pub const VOCAB_LEVELS: usize = 5;
    pub const TOKEN_ID_PAD: usize = 0;
    pub const POSITION_ID_PAD: usize = 0;

    #[must_use]
    pub fn vocab_shift(&self) -> usize {
        Self::VOCAB_SHIFT
    }

    #[must_use]
    pub fn vocab_levels(&self) -> usize {
        Self::VOCAB_LEVELS
    }

    #[must_use]
    pub fn token_id_pad(&self) -> usize {
        Self::TOKEN_ID_PAD
    }

    #[must_use]
    pub fn position_id_pad(&self) -> usize {
        Self::POSITION_ID_PAD
    }

    /// Check whether `name` is a declared field
    #[must_use]
    pub fn has_field(name: &str) -> bool {
        FIELD_NAMES.contains(&name)
    }

    /// Set a single field from a JSON value
    ///
    /// Unknown names fail with [`DatasetError::UnknownField`]; values of the
    /// wrong shape fail with [`DatasetError::FieldType`].
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "hdf5_file" => self.hdf5_file = opt_path(name, value)?,
            "supervised_file" => self.supervised_file = opt_path(name, value)?,
            "kind" => {
                self.kind = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.parse()?),
                    _ => return Err(type_error(name, "dataset kind string or null")),
                }
            }
            "meta_file" => self.meta_file = opt_path(name, value)?,
            "ignore" => self.ignore = boolean(name, &value)?,
            "ignore_object" => {
                self.ignore_object = match value {
                    Value::Null => None,
                    v => Some(
                        serde_json::from_value(v)
                            .map_err(|_| type_error(name, "string or list of strings"))?,
                    ),
                }
            }
            "batch_size" => {
                self.batch_size = match unsigned(name, &value)? {
                    0 => return Err(type_error(name, "positive integer")),
                    n => n,
                }
            }
            "num_workers" => self.num_workers = unsigned(name, &value)?,
            "shuffle" => self.shuffle = boolean(name, &value)?,
            "pin_memory" => self.pin_memory = boolean(name, &value)?,
            "perturbation" => self.perturbation = boolean(name, &value)?,
            "perturbation_object" => self.perturbation_object = opt_string(name, value)?,
            "perturbation_value" => {
                self.perturbation_value = match value {
                    Value::Null => None,
                    Value::Number(n) => match n.as_i64() {
                        Some(v @ (0 | 1)) => Some(v as u8),
                        Some(v) => return Err(ValidationError::InvalidPerturbationValue(v).into()),
                        None => return Err(type_error(name, "0, 1 or null")),
                    },
                    _ => return Err(type_error(name, "0, 1 or null")),
                }
            }
            "prompt_kind" => {
                self.prompt_kind = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.parse()?),
                    _ => return Err(type_error(name, "prompt kind string or null")),
                }
            }
            "prompt_regulator" => self.prompt_regulator = opt_string(name, value)?,
            "prompt_regulator_cache_file" => {
                self.prompt_regulator_cache_file = opt_path(name, value)?;
            }
            "prompt_celltype" => self.prompt_celltype = opt_string(name, value)?,
            "prompt_celltype_cache_file" => {
                self.prompt_celltype_cache_file = opt_path(name, value)?;
            }
            "prompt_regulator_cache_pin_memory" => {
                self.prompt_regulator_cache_pin_memory = boolean(name, &value)?;
            }
            "prompt_regulator_cache_limit" => {
                self.prompt_regulator_cache_limit = unsigned(name, &value)?;
            }
            "fasta_file" => self.fasta_file = opt_path(name, value)?,
            "flank_window" => self.flank_window = unsigned(name, &value)?,
            other => return Err(DatasetError::unknown_field(other)),
        }
        Ok(())
    }
}

impl TryFrom<Map<String, Value>> for DatasetConfig {
    type Error = DatasetError;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in map {
            config.set_field(&key, value)?;
        }
        Ok(config)
    }
}

fn type_error(field: &str, expected: &'static str) -> DatasetError {
    DatasetError::FieldType { field: field.to_string(), expected }
}

fn opt_path(field: &str, value: Value) -> Result<Option<PathBuf>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(PathBuf::from(s))),
        _ => Err(type_error(field, "path string or null")),
    }
}

fn opt_string(field: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(type_error(field, "string or null")),
    }
}

/// Accept a JSON boolean or a quoted `"true"`/`"false"`.
fn boolean(field: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(type_error(field, "boolean")),
        },
        _ => Err(type_error(field, "boolean")),
    }
}

fn unsigned(field: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| type_error(field, "non-negative integer"))
}
