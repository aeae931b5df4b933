//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::{DatasetConfig, DatasetKind};
use crate::error::DatasetError;
use proptest::prelude::*;
use serde_json::json;

fn arb_kind() -> impl Strategy<Value = DatasetKind> {
    prop::sample::select(DatasetKind::ALL.to_vec())
}

fn arb_valid_config() -> impl Strategy<Value = DatasetConfig> {
    (arb_kind(), 1usize..512, 0usize..64, any::<bool>(), 0u8..2, 0usize..16).prop_map(
        |(kind, batch_size, num_workers, perturbation, value, flank_window)| DatasetConfig {
            kind: Some(kind),
            batch_size,
            num_workers,
            perturbation,
            perturbation_value: Some(value),
            flank_window,
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_perturbation_needs_value(config in arb_valid_config()) {
        let mut config = config;
        config.perturbation = true;
        config.perturbation_value = None;
        prop_assert_eq!(
            validate_config(&config),
            Err(ValidationError::MissingPerturbationValue)
        );
    }

    #[test]
    fn prop_out_of_range_perturbation_value_rejected(
        config in arb_valid_config(),
        value in 2u8..=u8::MAX,
    ) {
        let mut config = config;
        config.perturbation_value = Some(value);
        prop_assert_eq!(
            validate_config(&config),
            Err(ValidationError::InvalidPerturbationValue(i64::from(value)))
        );
    }

    #[test]
    fn prop_unlisted_kind_rejected(name in "[A-Za-z]{1,24}") {
        prop_assume!(!DatasetKind::names().contains(&name.as_str()));
        let result = DatasetConfig::from_value(json!({ "kind": name }));
        prop_assert!(matches!(
            result,
            Err(DatasetError::Validation(ValidationError::InvalidKind(_)))
        ));
    }
}
