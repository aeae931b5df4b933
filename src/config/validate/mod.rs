//! Cross-field checks on a [`DatasetConfig`](crate::config::DatasetConfig)
//!
//! Per-field shape checks happen when a field is set; this module covers
//! what a direct field write can still get wrong, such as a missing `kind`
//! or an out-of-range `perturbation_value`.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
