//! End-to-end: preset -> config -> dataset -> dataloader

use chrombert_dataset::config::{
    get_preset_dataset_config, overrides_from_value, DatasetConfig, DatasetKind, Overrides,
};
use chrombert_dataset::dataset::Prompt;
use chrombert_dataset::{Dataset, DatasetError};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cache_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hg38_6k_1kb.hdf5"), b"").unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("config/hg38_6k_meta.json"), b"{}").unwrap();
    fs::create_dir_all(dir.path().join("other")).unwrap();
    fs::write(dir.path().join("other/hg38.fa"), b">chr1\nACGT\n").unwrap();
    dir
}

fn supervised_file(dir: &Path) -> String {
    let path = dir.join("train.csv");
    let rows: String = (0..10)
        .map(|i| format!("chr1,{},{},{},{}\n", i * 1000, (i + 1) * 1000, i, i % 2))
        .collect();
    fs::write(&path, format!("chrom,start,end,build_region_index,label\n{rows}")).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn preset_to_dataloader() {
    let cache = cache_dir();
    let work = TempDir::new().unwrap();
    let overrides = overrides_from_value(json!({
        "supervised_file": supervised_file(work.path()),
        "batch_size": 4,
        "num_workers": 2,
    }))
    .unwrap();

    let config = get_preset_dataset_config("default", Some(cache.path()), overrides).unwrap();
    let loader = config.init_dataloader(Overrides::new()).unwrap();

    assert_eq!(loader.dataset().kind(), DatasetKind::GeneralDataset);
    assert_eq!(loader.num_batches(), 3);
    let total: usize = loader.iter().map(|batch| batch.len()).sum();
    assert_eq!(total, 10);
}

#[test]
fn prompt_dna_preset_resolves_fasta() {
    let cache = cache_dir();
    let work = TempDir::new().unwrap();
    let overrides = overrides_from_value(json!({
        "supervised_file": supervised_file(work.path()),
        "num_workers": 0,
    }))
    .unwrap();

    let config = get_preset_dataset_config("prompt_dna", Some(cache.path()), overrides).unwrap();
    let dataset = config.init_dataset(Overrides::new()).unwrap();
    let expected = std::path::absolute(cache.path().join("other/hg38.fa")).unwrap();
    assert_eq!(dataset.get(0).unwrap().prompt, Some(Prompt::Dna { fasta_file: expected }));
}

#[test]
fn resolved_config_survives_save_and_reload() {
    let cache = cache_dir();
    let work = TempDir::new().unwrap();
    let overrides = overrides_from_value(json!({
        "supervised_file": supervised_file(work.path()),
        "prompt_regulator": "ctcf",
    }))
    .unwrap();
    let config =
        get_preset_dataset_config("prompt_cistrome", Some(cache.path()), overrides).unwrap();

    let saved = work.path().join("dataset.json");
    config.save(&saved).unwrap();
    let reloaded = DatasetConfig::from_path(&saved).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.to_dict(), config.to_dict());
}

#[test]
fn missing_celltype_surfaces_at_dataset_build() {
    let cache = cache_dir();
    let work = TempDir::new().unwrap();
    let overrides = overrides_from_value(json!({
        "supervised_file": supervised_file(work.path()),
        "prompt_regulator": "ctcf",
        "num_workers": 0,
    }))
    .unwrap();
    let config =
        get_preset_dataset_config("prompt_expression", Some(cache.path()), overrides).unwrap();

    let err = config.init_dataset(Overrides::new()).unwrap_err();
    assert!(
        matches!(err, DatasetError::MissingRequiredField { ref field } if field == "prompt_celltype")
    );

    let dataset = config
        .init_dataset(overrides_from_value(json!({ "prompt_celltype": "k562" })).unwrap())
        .unwrap();
    assert_eq!(dataset.len(), 10);
}

#[test]
fn preset_from_explicit_file() {
    let cache = cache_dir();
    let work = TempDir::new().unwrap();
    let preset = work.path().join("mine.json");
    fs::write(&preset, json!({ "kind": "MultiFlankwindowDataset", "flank_window": 1 }).to_string())
        .unwrap();
    let overrides =
        overrides_from_value(json!({ "supervised_file": supervised_file(work.path()) })).unwrap();

    let config =
        get_preset_dataset_config(preset.to_str().unwrap(), Some(cache.path()), overrides)
            .unwrap();
    assert_eq!(config.kind, Some(DatasetKind::MultiFlankwindowDataset));
    assert_eq!(config.hdf5_file, None);
}
