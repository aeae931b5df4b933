//! Packaged preset configurations
//!
//! A preset is a partial config whose relative `*_file` paths are resolved
//! against a local cache directory (by default `~/.cache/chrombert/data`).

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::loader::{read_config_map, Overrides};
use super::schema::DatasetConfig;
use crate::error::{DatasetError, Result};

const SUPERVISED_FILE: &str = "supervised_file";

/// Preset documents compiled into the crate, keyed by name
const PRESETS: &[(&str, &str)] = &[
    ("default", include_str!("../../presets/default.json")),
    ("general", include_str!("../../presets/general.json")),
    ("multi_flank_window", include_str!("../../presets/multi_flank_window.json")),
    ("prompt_cistrome", include_str!("../../presets/prompt_cistrome.json")),
    ("prompt_dna", include_str!("../../presets/prompt_dna.json")),
    ("prompt_expression", include_str!("../../presets/prompt_expression.json")),
];

/// Names of the packaged presets
#[must_use]
pub fn available_presets() -> Vec<String> {
    PRESETS.iter().map(|(name, _)| (*name).to_string()).collect()
}

/// Default cache base directory, `~/.cache/chrombert/data`
#[must_use]
pub fn default_basedir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("chrombert")
        .join("data")
}

/// Build a config from a preset plus overrides
///
/// `preset` is either a path to a JSON file or the name of a packaged
/// preset. Overrides win key-for-key over the preset and must include
/// `supervised_file`. Every other relative `*_file` value is joined onto
/// `basedir` (see [`default_basedir`]) and must exist.
pub fn get_preset_dataset_config(
    preset: &str,
    basedir: Option<&Path>,
    overrides: Overrides,
) -> Result<DatasetConfig> {
    if !overrides.contains_key(SUPERVISED_FILE) {
        return Err(DatasetError::MissingRequiredField { field: SUPERVISED_FILE.to_string() });
    }

    let basedir = basedir.map_or_else(default_basedir, Path::to_path_buf);
    let basedir = std::path::absolute(&basedir)
        .map_err(|e| DatasetError::io(format!("resolving {}", basedir.display()), e))?;
    if !basedir.exists() {
        return Err(DatasetError::PathNotFound { key: "basedir".to_string(), path: basedir });
    }

    let mut config = load_preset(preset)?;
    config.extend(overrides);

    for (key, value) in &mut config {
        if !key.ends_with("_file") || key == SUPERVISED_FILE {
            continue;
        }
        let Value::String(raw) = value else {
            continue;
        };
        if Path::new(raw.as_str()).is_absolute() {
            continue;
        }
        let resolved = basedir.join(raw.as_str());
        tracing::info!(key = %key, path = %resolved.display(), "update path");
        if !resolved.exists() {
            return Err(DatasetError::PathNotFound { key: key.clone(), path: resolved });
        }
        *value = Value::String(resolved.to_string_lossy().into_owned());
    }

    DatasetConfig::new(None, config)
}

/// Parse a preset given as a file path or a packaged name
fn load_preset(preset: &str) -> Result<Overrides> {
    let path = Path::new(preset);
    if fs::metadata(path).is_ok() {
        return read_config_map(path);
    }

    let (_, content) = PRESETS.iter().find(|(name, _)| *name == preset).ok_or_else(|| {
        DatasetError::UnknownPreset { preset: preset.to_string(), available: available_presets() }
    })?;
    Ok(serde_json::from_str(content)?)
}
