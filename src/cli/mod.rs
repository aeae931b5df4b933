//! Command-line interface for inspecting and resolving dataset configs

mod commands;
mod logging;


use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

pub use commands::{log_level, run_command};
pub use logging::LogLevel;

/// chrombert-dataset: dataset configuration tooling
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "chrombert-dataset")]
#[command(version)]
#[command(about = "Validate, resolve and inspect ChromBERT dataset configurations")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a dataset config file
    Validate(ValidateArgs),

    /// Print a dataset config with overrides applied
    Show(ShowArgs),

    /// List packaged presets
    Presets,

    /// Resolve a preset against the cache directory
    Preset(PresetArgs),

    /// Build the dataset and report its size
    Inspect(InspectArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the show command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a field, e.g. `--set batch_size=16`
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,
}

/// Arguments for the preset command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PresetArgs {
    /// Preset name or path to a preset JSON file
    #[arg(value_name = "PRESET", default_value = "default")]
    pub preset: String,

    /// Supervised file with the regions to predict
    #[arg(long)]
    pub supervised_file: PathBuf,

    /// Cache directory holding the reference files
    #[arg(long)]
    pub basedir: Option<PathBuf>,

    /// Override a field, e.g. `--set prompt_celltype=k562`
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,

    /// Write the resolved config here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a field, e.g. `--set num_workers=0`
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,
}

/// Parse `key=value`; the value is read as JSON, falling back to a string
pub fn parse_override(s: &str) -> Result<(String, Value), String> {
    let (key, raw) =
        s.split_once('=').ok_or_else(|| format!("Invalid override '{s}': expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid override '{s}': empty key"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
