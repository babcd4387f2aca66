// Batching — fixed-size partitioning with one shuffle order per plan

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::error::{DataError, Result};

/// Configuration for partitioning records into batches.
#[derive(Debug, Clone)]
pub struct Batcher {
    /// Number of records per batch.
    pub batch_size: usize,
    /// Whether to shuffle record order before partitioning.
    pub shuffle: bool,
    /// Optional random seed for reproducible shuffling.
    pub seed: Option<u64>,
}

impl Default for Batcher {
    fn default() -> Self {
        Self {
            batch_size: 32,
            shuffle: false,
            seed: None,
        }
    }
}

impl Batcher {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    /// Draw the record order for `n` records, once.
    ///
    /// With shuffling off this is the identity order; otherwise one
    /// Fisher-Yates permutation, seeded when a seed is set. Applying the
    /// returned plan to several same-length collections keeps them aligned
    /// batch for batch.
    pub fn plan(&self, n: usize) -> Result<BatchPlan> {
        if self.batch_size == 0 {
            return Err(DataError::InvalidBatchSize);
        }

        let mut indices: Vec<usize> = (0..n).collect();
        if self.shuffle {
            match self.seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    indices.shuffle(&mut rng);
                }
                None => {
                    let mut rng = thread_rng();
                    indices.shuffle(&mut rng);
                }
            }
        }

        Ok(BatchPlan {
            indices,
            batch_size: self.batch_size,
        })
    }

    /// Plan and apply in one step, for a single collection.
    pub fn batch<T: Clone>(&self, records: &[T]) -> Result<Vec<Vec<T>>> {
        self.plan(records.len())?.apply(records)
    }
}

/// One drawn record order plus the batch size it partitions into.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    indices: Vec<usize>,
    batch_size: usize,
}

impl BatchPlan {
    /// How many records the plan covers.
    pub fn num_records(&self) -> usize {
        self.indices.len()
    }

    /// How many full batches the plan yields (remainder dropped).
    pub fn num_batches(&self) -> usize {
        self.indices.len() / self.batch_size
    }

    /// Partition `records` into full batches following the plan's order.
    ///
    /// Records past the last full batch are dropped. The slice must have
    /// exactly the length the plan was drawn for.
    pub fn apply<T: Clone>(&self, records: &[T]) -> Result<Vec<Vec<T>>> {
        if records.len() != self.indices.len() {
            return Err(DataError::PlanMismatch {
                expected: self.indices.len(),
                got: records.len(),
            });
        }

        let mut batches = Vec::with_capacity(self.num_batches());
        for chunk in self.indices.chunks_exact(self.batch_size) {
            batches.push(chunk.iter().map(|&i| records[i].clone()).collect());
        }
        Ok(batches)
    }
}
