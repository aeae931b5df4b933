//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::DatasetConfig;

/// Validate a dataset configuration
///
/// Checks:
/// - `kind` is set (parsing already restricts it to the accepted kinds)
/// - `perturbation_value` is present when `perturbation` is enabled
/// - `perturbation_value`, when set, is 0 or 1
/// - `batch_size` is positive
pub fn validate_config(config: &DatasetConfig) -> Result<(), ValidationError> {
    if config.kind.is_none() {
        return Err(ValidationError::MissingKind);
    }

    if config.perturbation && config.perturbation_value.is_none() {
        return Err(ValidationError::MissingPerturbationValue);
    }

    if let Some(value) = config.perturbation_value.filter(|v| *v > 1) {
        return Err(ValidationError::InvalidPerturbationValue(i64::from(value)));
    }

    if config.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize);
    }

    Ok(())
}
