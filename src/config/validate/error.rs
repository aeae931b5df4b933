//! Validation error types
//!
//! Defines all validation error variants for dataset configurations.

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("kind must be one of [\"BasicDataset\", \"GeneralDataset\", \"MultiFlankwindowDataset\", \"PromptDataset\"], but got None!")]
    MissingKind,

    #[error("kind must be one of [\"BasicDataset\", \"GeneralDataset\", \"MultiFlankwindowDataset\", \"PromptDataset\"], but got {0}!")]
    InvalidKind(String),

    #[error("perturbation_value should be set when perturbation is set True!")]
    MissingPerturbationValue,

    #[error("Invalid perturbation_value: {0} (must be 0 for knock-out or 1 for overexpression)")]
    InvalidPerturbationValue(i64),

    #[error("batch_size must be a positive integer")]
    InvalidBatchSize,

    #[error("Invalid prompt_kind: {0} (must be one of: expression, cistrome, dna)")]
    InvalidPromptKind(String),
}
