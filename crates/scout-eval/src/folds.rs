//! K-fold partitioning.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use scout_core::{emit_rejected, Result, ScoutError};

/// One train/test split of a cross-validation run.
///
/// `train` is the complement of `test` within the partitioned data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fold<R> {
    /// 1-based fold number.
    pub fold_num: usize,
    pub train: Vec<R>,
    pub test: Vec<R>,
}

impl<R> Fold<R> {
    pub fn train_size(&self) -> usize {
        self.train.len()
    }

    pub fn test_size(&self) -> usize {
        self.test.len()
    }
}

/// Partition `data` into `n_folds` contiguous test blocks in input order.
///
/// Each block holds `len / n_folds` records; the last block also takes the
/// remainder. Fails when `n_folds` is zero or larger than the data.
pub fn create_folds<R: Clone>(data: &[R], n_folds: usize) -> Result<Vec<Fold<R>>> {
    check_fold_count(n_folds, data.len())?;

    let fold_size = data.len() / n_folds;
    let folds = (0..n_folds)
        .map(|i| {
            let start = i * fold_size;
            let end = if i + 1 == n_folds {
                data.len()
            } else {
                start + fold_size
            };
            let mut train = Vec::with_capacity(data.len() - (end - start));
            train.extend_from_slice(&data[..start]);
            train.extend_from_slice(&data[end..]);
            Fold {
                fold_num: i + 1,
                train,
                test: data[start..end].to_vec(),
            }
        })
        .collect();
    Ok(folds)
}

/// Shuffle a copy of `data` with `rng`, then partition it like
/// [`create_folds`]. The caller's slice is left untouched.
pub fn create_shuffled_folds<R, G>(data: &[R], n_folds: usize, rng: &mut G) -> Result<Vec<Fold<R>>>
where
    R: Clone,
    G: Rng + ?Sized,
{
    check_fold_count(n_folds, data.len())?;
    let mut shuffled = data.to_vec();
    shuffled.shuffle(rng);
    create_folds(&shuffled, n_folds)
}

fn check_fold_count(n_folds: usize, samples: usize) -> Result<()> {
    if n_folds == 0 || n_folds > samples {
        let err = ScoutError::InvalidFoldCount { n_folds, samples };
        emit_rejected("create_folds", &err);
        return Err(err);
    }
    Ok(())
}
