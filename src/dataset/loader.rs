//! Batching loader over a [`Dataset`]
//!
//! # Example
//!
//! ```ignore
//! use chrombert_dataset::dataset::DataLoader;
//!
//! let loader = DataLoader::new(dataset, 8, true, 4)?.with_seed(7);
//! for batch in loader.iter() {
//!     // Feed batch to the model
//! }
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use super::sample::Sample;
use super::Dataset;
use crate::error::{DatasetError, Result};

const DEFAULT_SEED: u64 = 42;

/// Splits a dataset into batches, optionally shuffled, loading each batch on
/// a pool of `num_workers` threads.
pub struct DataLoader<D> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    num_workers: usize,
    seed: u64,
    order: Vec<usize>,
    pool: Option<rayon::ThreadPool>,
}

impl<D: Dataset> DataLoader<D> {
    /// Create a loader; `num_workers == 0` loads batches on the calling thread.
    pub fn new(dataset: D, batch_size: usize, shuffle: bool, num_workers: usize) -> Result<Self> {
        let pool = if num_workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_workers)
                .thread_name(|i| format!("dataloader-{i}"))
                .build()
                .map_err(|e| {
                    DatasetError::io("starting dataloader workers", std::io::Error::other(e))
                })?;
            Some(pool)
        } else {
            None
        };

        let mut loader = Self {
            order: (0..dataset.len()).collect(),
            dataset,
            batch_size: batch_size.max(1),
            shuffle,
            num_workers,
            seed: DEFAULT_SEED,
            pool,
        };
        loader.reorder(0);
        Ok(loader)
    }

    /// Set the shuffle seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.reorder(0);
        self
    }

    /// Reshuffle for a new epoch; no-op when shuffling is off
    pub fn set_epoch(&mut self, epoch: u64) {
        self.reorder(epoch);
    }

    fn reorder(&mut self, epoch: u64) {
        self.order = (0..self.dataset.len()).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(epoch));
            self.order.shuffle(&mut rng);
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Number of batches; the last one may be short
    #[must_use]
    pub fn num_batches(&self) -> usize {
        self.order.len().div_ceil(self.batch_size)
    }

    /// Samples of batch `index`
    #[must_use]
    pub fn batch(&self, index: usize) -> Option<Vec<Sample>> {
        let start = index.checked_mul(self.batch_size)?;
        if start >= self.order.len() {
            return None;
        }
        let end = (start + self.batch_size).min(self.order.len());
        let indices = &self.order[start..end];

        let batch: Vec<Sample> = match &self.pool {
            Some(pool) => pool
                .install(|| indices.par_iter().filter_map(|&i| self.dataset.get(i)).collect()),
            None => indices.iter().filter_map(|&i| self.dataset.get(i)).collect(),
        };
        Some(batch)
    }

    /// Iterate over all batches in order
    #[must_use]
    pub fn iter(&self) -> Batches<'_, D> {
        Batches { loader: self, next: 0 }
    }
}

impl<'a, D: Dataset> IntoIterator for &'a DataLoader<D> {
    type Item = Vec<Sample>;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the batches of a [`DataLoader`]
pub struct Batches<'a, D> {
    loader: &'a DataLoader<D>,
    next: usize,
}

impl<D: Dataset> Iterator for Batches<'_, D> {
    type Item = Vec<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.loader.batch(self.next)?;
        self.next += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.loader.num_batches().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
