//! Dataset configuration
//!
//! A [`DatasetConfig`] describes which dataset to build, where its source
//! files live and how the dataloader batches it. Configs are loaded from
//! JSON files, key/value overrides, other configs or packaged presets.
//!
//! # Example Config
//!
//! ```json
//! {
//!     "hdf5_file": "hg38_6k_1kb.hdf5",
//!     "supervised_file": "train.csv",
//!     "kind": "GeneralDataset",
//!     "batch_size": 8
//! }
//! ```

mod kind;
mod loader;
mod preset;
mod schema;
pub mod validate;


pub use kind::{DatasetKind, IgnoreObject, PerturbationMode, PromptKind};
pub use loader::{overrides_from_value, ConfigSeed, Overrides};
pub use preset::{available_presets, default_basedir, get_preset_dataset_config};
pub use schema::{DatasetConfig, FIELD_NAMES};
pub use validate::{validate_config, ValidationError};
