//! Dataset configuration for ChromBERT fine-tuning
//!
//! - [`config`]: the [`DatasetConfig`] record, JSON load/save, validation and
//!   packaged presets
//! - [`dataset`]: the datasets a config can build and the batching
//!   [`DataLoader`](dataset::DataLoader)
//!
//! # Example
//!
//! ```no_run
//! use chrombert_dataset::config::{get_preset_dataset_config, overrides_from_value};
//! use serde_json::json;
//!
//! let overrides = overrides_from_value(json!({ "supervised_file": "train.csv" }))?;
//! let config = get_preset_dataset_config("default", None, overrides)?;
//! let loader = config.init_dataloader(Default::default())?;
//! for batch in loader.iter() {
//!     println!("{} samples", batch.len());
//! }
//! # Ok::<(), chrombert_dataset::DatasetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;

pub use config::{DatasetConfig, DatasetKind, PromptKind};
pub use dataset::{AnyDataset, DataLoader, Dataset};
pub use error::{DatasetError, Result};
