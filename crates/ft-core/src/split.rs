//! Two-fold sample splitting.
//!
//! Partitions a sample into disjoint train/test index sets, either over raw
//! indices or over group ids when all members of a group (e.g. all tracks of
//! one event) must land in the same fold. Splits are driven by a seeded
//! ChaCha stream so a fixed seed reproduces the partition exactly.

use ft_common::{Error, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn check_fraction(train_fraction: f64) -> Result<()> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Error::InvalidTrainFraction(train_fraction));
    }
    Ok(())
}

/// Split `0..n` into disjoint (train, test) index sets.
///
/// The train set holds `round(train_fraction * n)` indices chosen by a seeded
/// shuffle; both sets are returned in ascending order. Degenerate sizes
/// (an empty fold for tiny `n`) are permitted.
pub fn split_indices(
    n: usize,
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    check_fraction(train_fraction)?;

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_train = (train_fraction * n as f64).round() as usize;
    let mut train: Vec<usize> = indices[..n_train].to_vec();
    let mut test: Vec<usize> = indices[n_train..].to_vec();
    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// Split indices so that no group id appears in both folds.
///
/// The partition is drawn over the set of distinct group ids (in ascending id
/// order, so the result depends only on the id values and the seed) and then
/// expanded back to member indices.
pub fn split_groups(
    group_ids: &[u64],
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    check_fraction(train_fraction)?;

    let mut unique: Vec<u64> = group_ids
        .iter()
        .copied()
        .collect::<HashSet<u64>>()
        .into_iter()
        .collect();
    unique.sort_unstable();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    unique.shuffle(&mut rng);
    let n_train = (train_fraction * unique.len() as f64).round() as usize;
    let train_groups: HashSet<u64> = unique[..n_train].iter().copied().collect();

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (i, id) in group_ids.iter().enumerate() {
        if train_groups.contains(id) {
            train.push(i);
        } else {
            test.push(i);
        }
    }
    Ok((train, test))
}
