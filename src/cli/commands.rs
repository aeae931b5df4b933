//! CLI command implementations

use serde_json::Value;

use super::logging::status;
use super::{Cli, Command, InspectArgs, LogLevel, PresetArgs, ShowArgs, ValidateArgs};
use crate::config::{available_presets, get_preset_dataset_config, DatasetConfig, Overrides};
use crate::dataset::Dataset;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let level = log_level(&cli);

    match cli.command {
        Command::Validate(args) => run_validate(args, level),
        Command::Show(args) => run_show(args, level),
        Command::Presets => run_presets(level),
        Command::Preset(args) => run_preset(args, level),
        Command::Inspect(args) => run_inspect(args, level),
    }
}

/// Output level from the verbose/quiet flags
#[must_use]
pub fn log_level(cli: &Cli) -> LogLevel {
    LogLevel::from_flags(cli.verbose, cli.quiet)
}

fn to_overrides(pairs: Vec<(String, Value)>) -> Overrides {
    pairs.into_iter().collect()
}

fn load(config: &std::path::Path, overrides: Vec<(String, Value)>) -> Result<DatasetConfig, String> {
    let mut loaded = DatasetConfig::default();
    loaded.load(config).map_err(|e| format!("Failed to load {}: {e}", config.display()))?;
    loaded.update(to_overrides(overrides)).map_err(|e| e.to_string())?;
    loaded.validate().map_err(|e| e.to_string())?;
    Ok(loaded)
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let config = load(&args.config, Vec::new())?;
    status(level, &format!("✓ {} is valid", args.config.display()));
    tracing::debug!(
        kind = ?config.kind,
        batch_size = config.batch_size,
        num_workers = config.num_workers,
        "validated config"
    );
    Ok(())
}

fn run_show(args: ShowArgs, _level: LogLevel) -> Result<(), String> {
    let config = load(&args.config, args.overrides)?;
    println!("{config}");
    Ok(())
}

fn run_presets(level: LogLevel) -> Result<(), String> {
    for name in available_presets() {
        status(level, &name);
    }
    Ok(())
}

fn run_preset(args: PresetArgs, level: LogLevel) -> Result<(), String> {
    let mut overrides = to_overrides(args.overrides);
    overrides.insert(
        "supervised_file".to_string(),
        Value::String(args.supervised_file.to_string_lossy().into_owned()),
    );

    let config = get_preset_dataset_config(&args.preset, args.basedir.as_deref(), overrides)
        .map_err(|e| e.to_string())?;

    match args.output {
        Some(path) => {
            config.save(&path).map_err(|e| e.to_string())?;
            status(level, &format!("✓ Saved config to {}", path.display()));
        }
        None => println!("{config}"),
    }
    Ok(())
}

fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    let config = load(&args.config, args.overrides)?;
    let loader = config.init_dataloader(Overrides::new()).map_err(|e| e.to_string())?;
    let dataset = loader.dataset();

    status(level, &format!("Dataset: {}", dataset.kind()));
    status(level, &format!("  Samples: {}", dataset.len()));
    status(
        level,
        &format!("  Batches: {} (batch size {})", loader.num_batches(), loader.batch_size()),
    );
    if !dataset.ignored().is_empty() {
        status(level, &format!("  Ignored: {}", dataset.ignored().join(", ")));
    }
    if let Some(sample) = dataset.get(0) {
        tracing::debug!(?sample, "first sample");
    }
    Ok(())
}
