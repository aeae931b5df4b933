//! Supervised region table
//!
//! CSV (or TSV for `.tsv` files) with a header row. Required columns:
//! `chrom`, `start`, `end`, `build_region_index`. Optional: `label`,
//! `regulator`, `celltype`. Extra columns are ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::sample::Region;
use crate::error::{DatasetError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["chrom", "start", "end", "build_region_index"];

/// One row of the supervised file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SupervisedRow {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub build_region_index: u64,
    #[serde(default)]
    pub label: Option<f64>,
    #[serde(default)]
    pub regulator: Option<String>,
    #[serde(default)]
    pub celltype: Option<String>,
}

impl SupervisedRow {
    #[must_use]
    pub fn region(&self) -> Region {
        Region {
            chrom: self.chrom.clone(),
            start: self.start,
            end: self.end,
            build_region_index: self.build_region_index,
        }
    }
}

/// Parsed supervised file
#[derive(Debug, Clone)]
pub struct SupervisedTable {
    path: PathBuf,
    rows: Vec<SupervisedRow>,
}

impl SupervisedTable {
    /// Read and parse a supervised file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::PathNotFound {
                key: "supervised_file".to_string(),
                path: path.to_path_buf(),
            });
        }

        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") => b'\t',
            _ => b',',
        };
        let mut reader =
            csv::ReaderBuilder::new().delimiter(delimiter).trim(csv::Trim::All).from_path(path)?;

        let headers = reader.headers()?.clone();
        if let Some(missing) =
            REQUIRED_COLUMNS.iter().find(|col| !headers.iter().any(|h| h == **col))
        {
            return Err(DatasetError::SupervisedFormat {
                path: path.to_path_buf(),
                message: format!("missing required column '{missing}'"),
            });
        }

        let rows = reader.deserialize().collect::<std::result::Result<Vec<SupervisedRow>, _>>()?;
        for row in &rows {
            if row.end < row.start {
                return Err(DatasetError::SupervisedFormat {
                    path: path.to_path_buf(),
                    message: format!(
                        "region {}:{}-{} ends before it starts",
                        row.chrom, row.start, row.end
                    ),
                });
            }
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "loaded supervised file");
        Ok(Self { path: path.to_path_buf(), rows })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn rows(&self) -> &[SupervisedRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
