//! Loading, updating and serializing dataset configurations

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::kind::IgnoreObject;
use super::schema::DatasetConfig;
use super::validate::validate_config;
use crate::error::{DatasetError, Result};

/// Key/value overrides applied on top of a seed
pub type Overrides = Map<String, Value>;

/// Starting point for a [`DatasetConfig`]
#[derive(Debug, Clone)]
pub enum ConfigSeed {
    /// JSON file on disk
    Path(PathBuf),
    /// Already parsed key/value mapping
    Map(Overrides),
    /// Another configuration, copied field for field
    Config(Box<DatasetConfig>),
}

impl From<PathBuf> for ConfigSeed {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ConfigSeed {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for ConfigSeed {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Overrides> for ConfigSeed {
    fn from(map: Overrides) -> Self {
        Self::Map(map)
    }
}

impl From<DatasetConfig> for ConfigSeed {
    fn from(config: DatasetConfig) -> Self {
        Self::Config(Box::new(config))
    }
}

impl From<&DatasetConfig> for ConfigSeed {
    fn from(config: &DatasetConfig) -> Self {
        Self::Config(Box::new(config.clone()))
    }
}

/// Convert a JSON object into overrides
///
/// `null` yields no overrides; any other non-object value is rejected.
pub fn overrides_from_value(value: Value) -> Result<Overrides> {
    match value {
        Value::Null => Ok(Overrides::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

impl DatasetConfig {
    /// Build a configuration from an optional seed plus overrides, then validate
    ///
    /// # Example
    ///
    /// ```
    /// use chrombert_dataset::config::{overrides_from_value, DatasetConfig};
    /// use serde_json::json;
    ///
    /// let overrides = overrides_from_value(json!({
    ///     "kind": "GeneralDataset",
    ///     "supervised_file": "train.csv",
    /// }))?;
    /// let config = DatasetConfig::new(None, overrides)?;
    /// assert_eq!(config.batch_size, 8);
    /// # Ok::<(), chrombert_dataset::DatasetError>(())
    /// ```
    pub fn new(seed: Option<ConfigSeed>, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(seed) = seed {
            config.load(seed)?;
        }
        config.update(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Build and validate from a seed with no overrides
    pub fn from_seed(seed: impl Into<ConfigSeed>) -> Result<Self> {
        Self::new(Some(seed.into()), Overrides::new())
    }

    /// Build and validate from a JSON config file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_seed(path.as_ref())
    }

    /// Build and validate from a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        Self::new(None, overrides_from_value(value)?)
    }

    /// Merge a seed into this configuration
    ///
    /// A config seed replaces every field. Path and map seeds set only the
    /// keys they contain; an undeclared key fails with
    /// [`DatasetError::UnknownField`] and leaves `self` unchanged.
    pub fn load(&mut self, seed: impl Into<ConfigSeed>) -> Result<()> {
        match seed.into() {
            ConfigSeed::Config(other) => {
                *self = *other;
                Ok(())
            }
            ConfigSeed::Path(path) => {
                let map = read_config_map(&path)?;
                self.update(map)
            }
            ConfigSeed::Map(map) => self.update(map),
        }
    }

    /// Set the given fields
    ///
    /// All keys are applied to a staged copy first, so a failure on any key
    /// leaves `self` untouched. Does not revalidate.
    pub fn update(&mut self, overrides: Overrides) -> Result<()> {
        if overrides.is_empty() {
            return Ok(());
        }
        let mut staged = self.clone();
        for (key, value) in overrides {
            staged.set_field(&key, value)?;
        }
        *self = staged;
        Ok(())
    }

    /// Set one field; shorthand for a single-key [`update`](Self::update)
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.set_field(key, value.into())
    }

    /// Run the consistency checks
    pub fn validate(&self) -> Result<()> {
        validate_config(self)?;
        Ok(())
    }

    /// Independent copy with overrides applied; does not revalidate
    pub fn clone_with(&self, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();
        config.load(self.to_dict())?;
        config.update(overrides)?;
        Ok(config)
    }

    /// Every declared field as an ordered mapping
    #[must_use]
    pub fn to_dict(&self) -> Overrides {
        let mut map = Map::new();
        // [general]
        map.insert("hdf5_file".into(), path_value(&self.hdf5_file));
        map.insert("supervised_file".into(), path_value(&self.supervised_file));
        map.insert("kind".into(), str_value(self.kind.map(|k| k.as_str())));
        map.insert("meta_file".into(), path_value(&self.meta_file));
        // [ignore]
        map.insert("ignore".into(), Value::Bool(self.ignore));
        map.insert("ignore_object".into(), ignore_value(&self.ignore_object));
        // [dataloader]
        map.insert("batch_size".into(), Value::from(self.batch_size));
        map.insert("num_workers".into(), Value::from(self.num_workers));
        map.insert("shuffle".into(), Value::Bool(self.shuffle));
        map.insert("pin_memory".into(), Value::Bool(self.pin_memory));
        // [perturbation]
        map.insert("perturbation".into(), Value::Bool(self.perturbation));
        map.insert("perturbation_object".into(), str_value(self.perturbation_object.as_deref()));
        map.insert(
            "perturbation_value".into(),
            self.perturbation_value.map_or(Value::Null, Value::from),
        );
        // [prompt]
        map.insert("prompt_kind".into(), str_value(self.prompt_kind.map(|k| k.as_str())));
        map.insert("prompt_regulator".into(), str_value(self.prompt_regulator.as_deref()));
        map.insert(
            "prompt_regulator_cache_file".into(),
            path_value(&self.prompt_regulator_cache_file),
        );
        map.insert("prompt_celltype".into(), str_value(self.prompt_celltype.as_deref()));
        map.insert(
            "prompt_celltype_cache_file".into(),
            path_value(&self.prompt_celltype_cache_file),
        );
        map.insert(
            "prompt_regulator_cache_pin_memory".into(),
            Value::Bool(self.prompt_regulator_cache_pin_memory),
        );
        map.insert(
            "prompt_regulator_cache_limit".into(),
            Value::from(self.prompt_regulator_cache_limit),
        );
        map.insert("fasta_file".into(), path_value(&self.fasta_file));
        // [multi window]
        map.insert("flank_window".into(), Value::from(self.flank_window));
        map
    }

    /// Entries of [`to_dict`](Self::to_dict)
    pub fn items(&self) -> impl Iterator<Item = (String, Value)> {
        self.to_dict().into_iter()
    }

    /// Pretty JSON with 4-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Value::Object(self.to_dict()).serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| {
            DatasetError::io("encoding config JSON", std::io::Error::other(e))
        })
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_json_pretty()?;
        fs::write(path.as_ref(), content).map_err(|e| {
            DatasetError::io(format!("writing config file {}", path.as_ref().display()), e)
        })
    }
}

/// Read a JSON config file into a key/value mapping
pub(crate) fn read_config_map(path: &Path) -> Result<Overrides> {
    let content = fs::read_to_string(path)
        .map_err(|e| DatasetError::io(format!("reading config file {}", path.display()), e))?;
    Ok(serde_json::from_str(&content)?)
}

fn path_value(path: &Option<PathBuf>) -> Value {
    path.as_ref().map_or(Value::Null, |p| Value::String(p.to_string_lossy().into_owned()))
}

fn str_value(s: Option<&str>) -> Value {
    s.map_or(Value::Null, |s| Value::String(s.to_string()))
}

fn ignore_value(ignore: &Option<IgnoreObject>) -> Value {
    match ignore {
        None => Value::Null,
        Some(IgnoreObject::One(s)) => Value::String(s.clone()),
        Some(IgnoreObject::Many(v)) => Value::from(v.clone()),
    }
}

impl fmt::Debug for DatasetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetConfig({})", Value::Object(self.to_dict()))
    }
}

impl fmt::Display for DatasetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_pretty().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
