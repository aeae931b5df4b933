//! Tests for dataset construction, the factory and the dataloader

use super::*;
use crate::config::{
    overrides_from_value, DatasetKind, Overrides, PerturbationMode, PromptKind, ValidationError,
};
use crate::error::DatasetError;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SUPERVISED_CSV: &str = "\
chrom,start,end,build_region_index,label
chr1,10000,11000,10,1
chr1,11000,12000,11,0
chr2,50000,51000,2,1
chr3,0,1000,0,0
chrX,7000,8000,700,1
";

const PROMPT_TSV: &str = "\
chrom\tstart\tend\tbuild_region_index\tlabel\tregulator\tcelltype
chr1\t10000\t11000\t10\t0.5\tctcf\tk562
chr1\t11000\t12000\t11\t0.1\t\t
";

struct Fixture {
    _dir: TempDir,
    supervised: PathBuf,
    prompt_tsv: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let supervised = dir.path().join("train.csv");
    let prompt_tsv = dir.path().join("prompt.tsv");
    fs::write(&supervised, SUPERVISED_CSV).unwrap();
    fs::write(&prompt_tsv, PROMPT_TSV).unwrap();
    Fixture { _dir: dir, supervised, prompt_tsv }
}

fn config(supervised: &Path, extra: Value) -> DatasetConfig {
    let mut map = overrides_from_value(extra).unwrap();
    map.insert("supervised_file".into(), json!(supervised.to_str().unwrap()));
    map.entry("num_workers").or_insert(json!(0));
    DatasetConfig::new(None, map).unwrap()
}

fn ov(value: Value) -> Overrides {
    overrides_from_value(value).unwrap()
}

// =========================================================================
// Supervised table
// =========================================================================

#[test]
fn test_read_csv_table() {
    let fx = fixture();
    let table = SupervisedTable::read(&fx.supervised).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(table.rows()[0].chrom, "chr1");
    assert_eq!(table.rows()[4].build_region_index, 700);
    assert_eq!(table.rows()[1].label, Some(0.0));
    assert_eq!(table.rows()[0].regulator, None);
}

#[test]
fn test_read_tsv_with_empty_optional_columns() {
    let fx = fixture();
    let table = SupervisedTable::read(&fx.prompt_tsv).unwrap();
    assert_eq!(table.rows()[0].regulator.as_deref(), Some("ctcf"));
    assert_eq!(table.rows()[1].regulator, None);
    assert_eq!(table.rows()[1].celltype, None);
}

#[test]
fn test_missing_required_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "chrom,start,end\nchr1,0,1000\n").unwrap();
    let err = SupervisedTable::read(&path).unwrap_err();
    match err {
        DatasetError::SupervisedFormat { message, .. } => {
            assert!(message.contains("build_region_index"));
        }
        other => panic!("expected SupervisedFormat, got {other:?}"),
    }
}

#[test]
fn test_inverted_region_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "chrom,start,end,build_region_index\nchr1,2000,1000,3\n").unwrap();
    assert!(matches!(
        SupervisedTable::read(&path),
        Err(DatasetError::SupervisedFormat { .. })
    ));
}

#[test]
fn test_missing_supervised_file() {
    let dir = TempDir::new().unwrap();
    let err = SupervisedTable::read(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::PathNotFound { ref key, .. } if key == "supervised_file"));
}

// =========================================================================
// Datasets
// =========================================================================

#[test]
fn test_general_dataset() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(&fx.supervised, json!({ "kind": "GeneralDataset" })))
        .unwrap();
    assert_eq!(ds.len(), 5);
    assert!(!ds.is_empty());

    let sample = ds.get(2).unwrap();
    assert_eq!(sample.index, 2);
    assert_eq!(sample.region.chrom, "chr2");
    assert_eq!(sample.label, Some(1.0));
    assert!(sample.flank_indices.is_none());
    assert!(sample.prompt.is_none());
    assert!(sample.perturbation.is_none());
    assert!(ds.get(5).is_none());
}

#[test]
fn test_general_dataset_requires_supervised_file() {
    let config = DatasetConfig::from_value(json!({ "kind": "GeneralDataset" })).unwrap();
    let err = GeneralDataset::new(config).unwrap_err();
    assert!(
        matches!(err, DatasetError::MissingRequiredField { ref field } if field == "supervised_file")
    );
}

#[test]
fn test_dataset_revalidates_config() {
    let fx = fixture();
    let mut config = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));
    config.perturbation = true;
    config.perturbation_value = None;
    assert!(matches!(GeneralDataset::new(config), Err(DatasetError::Validation(_))));
}

#[test]
fn test_perturbation_carried_to_samples() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(
        &fx.supervised,
        json!({
            "kind": "GeneralDataset",
            "perturbation": true,
            "perturbation_object": "ep300, crebbp",
            "perturbation_value": 1,
        }),
    ))
    .unwrap();
    let perturbation = ds.get(0).unwrap().perturbation.unwrap();
    assert_eq!(perturbation.mode, PerturbationMode::Overexpression);
    assert_eq!(perturbation.objects, vec!["ep300", "crebbp"]);
}

#[test]
fn test_ignored_objects() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(
        &fx.supervised,
        json!({ "kind": "GeneralDataset", "ignore": true, "ignore_object": "ctcf" }),
    ))
    .unwrap();
    assert_eq!(ds.ignored(), ["ctcf".to_string()]);

    let ds = GeneralDataset::new(config(
        &fx.supervised,
        json!({ "kind": "GeneralDataset", "ignore": false, "ignore_object": "ctcf" }),
    ))
    .unwrap();
    assert!(ds.ignored().is_empty());
}

#[test]
fn test_ignored_objects_for_flank_and_prompt_kinds() {
    let fx = fixture();
    let flank = MultiFlankwindowDataset::new(config(
        &fx.supervised,
        json!({
            "kind": "MultiFlankwindowDataset",
            "ignore": true,
            "ignore_object": ["ctcf", "ep300"],
        }),
    ))
    .unwrap();
    assert_eq!(flank.ignored(), ["ctcf".to_string(), "ep300".to_string()]);

    let prompt = PromptDataset::new(config(
        &fx.supervised,
        json!({
            "kind": "PromptDataset",
            "prompt_kind": "dna",
            "fasta_file": "hg38.fa",
            "ignore": true,
            "ignore_object": "GSM1036403",
        }),
    ))
    .unwrap();
    assert_eq!(prompt.ignored(), ["GSM1036403".to_string()]);
}

#[test]
fn test_dataset_rejects_out_of_range_perturbation_value() {
    let fx = fixture();
    let mut config = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));
    config.perturbation = true;
    config.perturbation_value = Some(2);
    let err = GeneralDataset::new(config).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::Validation(ValidationError::InvalidPerturbationValue(2))
    ));
}

#[test]
fn test_flank_indices_clamped() {
    assert_eq!(flank_indices(10, 2), vec![8, 9, 10, 11, 12]);
    assert_eq!(flank_indices(1, 3), vec![0, 1, 2, 3, 4]);
    assert_eq!(flank_indices(7, 0), vec![7]);
}

#[test]
fn test_multi_flank_dataset() {
    let fx = fixture();
    let ds = MultiFlankwindowDataset::new(config(
        &fx.supervised,
        json!({ "kind": "MultiFlankwindowDataset", "flank_window": 1 }),
    ))
    .unwrap();
    assert_eq!(ds.flank_window(), 1);
    assert_eq!(ds.get(0).unwrap().flank_indices, Some(vec![9, 10, 11]));
    assert_eq!(ds.get(3).unwrap().flank_indices, Some(vec![0, 1]));
}

#[test]
fn test_prompt_dataset_row_values_win() {
    let fx = fixture();
    let ds = PromptDataset::new(config(
        &fx.prompt_tsv,
        json!({
            "kind": "PromptDataset",
            "prompt_kind": "expression",
            "prompt_regulator": "ep300",
            "prompt_celltype": "hepg2",
        }),
    ))
    .unwrap();
    assert_eq!(ds.prompt_kind(), Some(PromptKind::Expression));
    assert_eq!(
        ds.get(0).unwrap().prompt,
        Some(Prompt::Profile {
            kind: PromptKind::Expression,
            regulator: "ctcf".into(),
            celltype: "k562".into(),
        })
    );
    assert_eq!(
        ds.get(1).unwrap().prompt,
        Some(Prompt::Profile {
            kind: PromptKind::Expression,
            regulator: "ep300".into(),
            celltype: "hepg2".into(),
        })
    );
}

#[test]
fn test_prompt_dataset_missing_regulator() {
    let fx = fixture();
    let err = PromptDataset::new(config(
        &fx.supervised,
        json!({ "kind": "PromptDataset", "prompt_kind": "cistrome", "prompt_celltype": "atac:k562" }),
    ))
    .unwrap_err();
    assert!(
        matches!(err, DatasetError::MissingRequiredField { ref field } if field == "prompt_regulator")
    );
}

#[test]
fn test_prompt_dataset_requires_prompt_kind() {
    let fx = fixture();
    let err = PromptDataset::new(config(&fx.supervised, json!({ "kind": "PromptDataset" })))
        .unwrap_err();
    assert!(
        matches!(err, DatasetError::MissingRequiredField { ref field } if field == "prompt_kind")
    );
}

#[test]
fn test_prompt_dataset_dna() {
    let fx = fixture();
    let err = PromptDataset::new(config(
        &fx.supervised,
        json!({ "kind": "PromptDataset", "prompt_kind": "dna" }),
    ))
    .unwrap_err();
    assert!(matches!(err, DatasetError::MissingRequiredField { ref field } if field == "fasta_file"));

    let ds = PromptDataset::new(config(
        &fx.supervised,
        json!({ "kind": "PromptDataset", "prompt_kind": "dna", "fasta_file": "hg38.fa" }),
    ))
    .unwrap();
    assert_eq!(ds.get(4).unwrap().prompt, Some(Prompt::Dna { fasta_file: "hg38.fa".into() }));
}

// =========================================================================
// Factory
// =========================================================================

#[test]
fn test_init_dataset_dispatches_on_kind() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));

    let ds = base.init_dataset(Overrides::new()).unwrap();
    assert_eq!(ds.kind(), DatasetKind::GeneralDataset);

    let ds = base
        .init_dataset(ov(json!({ "kind": "MultiFlankwindowDataset", "flank_window": 2 })))
        .unwrap();
    assert_eq!(ds.kind(), DatasetKind::MultiFlankwindowDataset);
    assert_eq!(ds.get(0).unwrap().flank_indices.map(|v| v.len()), Some(5));

    let ds = base
        .init_dataset(ov(json!({
            "kind": "PromptDataset",
            "prompt_kind": "dna",
            "fasta_file": "hg38.fa",
        })))
        .unwrap();
    assert_eq!(ds.kind(), DatasetKind::PromptDataset);
}

#[test]
fn test_init_dataset_dispatches_on_overridden_kind() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "BasicDataset" }));
    let (ds, resolved) =
        base.init_dataset_with_config(ov(json!({ "kind": "GeneralDataset" }))).unwrap();
    assert_eq!(ds.kind(), DatasetKind::GeneralDataset);
    assert_eq!(resolved.kind, Some(DatasetKind::GeneralDataset));
    assert_eq!(base.kind, Some(DatasetKind::BasicDataset));
}

#[test]
fn test_init_dataset_forwards_ignored_objects() {
    let fx = fixture();
    let base = config(
        &fx.supervised,
        json!({ "kind": "MultiFlankwindowDataset", "ignore": true, "ignore_object": "ctcf" }),
    );
    let ds = base.init_dataset(Overrides::new()).unwrap();
    assert_eq!(ds.kind(), DatasetKind::MultiFlankwindowDataset);
    assert_eq!(ds.ignored(), ["ctcf".to_string()]);

    let ds = base.init_dataset(ov(json!({ "ignore": false }))).unwrap();
    assert!(ds.ignored().is_empty());
}

#[test]
fn test_init_dataset_rejects_basic_dataset() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "BasicDataset" }));
    let err = base.init_dataset(Overrides::new()).unwrap_err();
    assert!(matches!(err, DatasetError::UnsupportedKind { ref kind } if kind == "BasicDataset"));
}

#[test]
fn test_init_dataset_does_not_touch_source() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));
    let (ds, resolved) =
        base.init_dataset_with_config(ov(json!({ "batch_size": 2 }))).unwrap();
    assert_eq!(resolved.batch_size, 2);
    assert_eq!(ds.config(), &resolved);
    assert_eq!(base.batch_size, 8);
}

#[test]
fn test_init_dataset_unknown_override() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));
    assert!(matches!(
        base.init_dataset(ov(json!({ "epochs": 1 }))),
        Err(DatasetError::UnknownField { .. })
    ));
}

// =========================================================================
// DataLoader
// =========================================================================

#[test]
fn test_init_dataloader_uses_resolved_params() {
    let fx = fixture();
    let base = config(&fx.supervised, json!({ "kind": "GeneralDataset" }));
    let loader =
        base.init_dataloader(ov(json!({ "batch_size": 2, "num_workers": 2, "shuffle": true })))
            .unwrap();
    assert_eq!(loader.batch_size(), 2);
    assert_eq!(loader.num_workers(), 2);
    assert!(loader.shuffle());
    assert_eq!(loader.num_batches(), 3);
}

#[test]
fn test_sequential_batches_cover_dataset_in_order() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(&fx.supervised, json!({ "kind": "GeneralDataset" })))
        .unwrap();
    let loader = DataLoader::new(ds, 2, false, 0).unwrap();
    let sizes: Vec<usize> = loader.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    let indices: Vec<usize> = loader.iter().flatten().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert!(loader.batch(3).is_none());
}

#[test]
fn test_shuffled_batches_are_a_permutation() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(&fx.supervised, json!({ "kind": "GeneralDataset" })))
        .unwrap();
    let loader = DataLoader::new(ds, 3, true, 2).unwrap().with_seed(7);
    let indices: HashSet<usize> = (&loader).into_iter().flatten().map(|s| s.index).collect();
    assert_eq!(indices, (0..5).collect());
}

#[test]
fn test_shuffle_is_deterministic_per_seed() {
    let fx = fixture();
    let build = || {
        let ds = GeneralDataset::new(config(&fx.supervised, json!({ "kind": "GeneralDataset" })))
            .unwrap();
        DataLoader::new(ds, 5, true, 0).unwrap().with_seed(11)
    };
    let a: Vec<usize> = build().iter().flatten().map(|s| s.index).collect();
    let b: Vec<usize> = build().iter().flatten().map(|s| s.index).collect();
    assert_eq!(a, b);
}

#[test]
fn test_zero_batch_size_clamped() {
    let fx = fixture();
    let ds = GeneralDataset::new(config(&fx.supervised, json!({ "kind": "GeneralDataset" })))
        .unwrap();
    let loader = DataLoader::new(ds, 0, false, 0).unwrap();
    assert_eq!(loader.batch_size(), 1);
    assert_eq!(loader.iter().size_hint(), (5, Some(5)));
}
