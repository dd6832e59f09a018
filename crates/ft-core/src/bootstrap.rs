//! Bootstrap estimation of calibration performance.
//!
//! Re-splits, refits, and rescores the isotonic calibration many times to
//! estimate the sampling distribution of the tagging metrics. Each trial
//! draws a fresh fold split from a seed derived off the base seed, so the
//! whole evaluation is reproducible while trials stay independent.

use ft_common::{Error, Result};
use ft_math::{mean, std_dev};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calibrate::{symmetrize, IsotonicCalibrator};
use crate::metrics::{dilution_squared, weighted_auc};
use crate::split::{split_groups, split_indices};

/// Options for [`bootstrap_calibrate_prob`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapOptions {
    /// Number of independent calibration trials.
    pub n_calibrations: usize,
    /// Fraction of samples (or groups) in the calibration fold.
    pub train_fraction: f64,
    /// Labels are binarized as `label > threshold`.
    pub threshold: f64,
    /// Mirror-augment the calibration fold before fitting.
    pub symmetrize: bool,
    /// Base seed; trial `t` splits with `seed + t`.
    pub seed: u64,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            n_calibrations: 30,
            train_fraction: 0.5,
            threshold: 0.0,
            symmetrize: false,
            seed: 42,
        }
    }
}

/// Parallel per-trial metric arrays from a bootstrap evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapOutcome {
    /// Dilution-squared of the calibrated test fold, one entry per trial.
    pub d2: Vec<f64>,
    /// Weighted AUC of the raw test-fold scores, one entry per trial.
    pub auc: Vec<f64>,
}

impl BootstrapOutcome {
    /// Mean and standard deviation of the D2 trials.
    pub fn d2_mean_std(&self) -> (f64, f64) {
        (mean(&self.d2), std_dev(&self.d2))
    }

    /// Mean and standard deviation of the AUC trials.
    pub fn auc_mean_std(&self) -> (f64, f64) {
        (mean(&self.auc), std_dev(&self.auc))
    }
}

/// Estimate the sampling distribution of D2 and AUC under isotonic
/// calibration.
///
/// Per trial: split (group-aware when `groups` is given), fit isotonic on
/// the calibration fold, apply it to the held-out fold, then record the
/// held-out fold's D2 (on calibrated probabilities) and weighted AUC (on the
/// raw scores). A trial that cannot be scored (e.g. a single-class test
/// fold) fails the whole evaluation.
pub fn bootstrap_calibrate_prob(
    labels: &[f64],
    weights: &[f64],
    probs: &[f64],
    groups: Option<&[u64]>,
    options: &BootstrapOptions,
) -> Result<BootstrapOutcome> {
    Error::check_same_length(labels.len(), probs.len())?;
    Error::check_same_length(weights.len(), probs.len())?;
    if let Some(g) = groups {
        Error::check_same_length(g.len(), probs.len())?;
    }
    if probs.is_empty() {
        return Err(Error::EmptyInput("bootstrap needs samples"));
    }

    let bin_labels: Vec<f64> = labels
        .iter()
        .map(|&l| if l > options.threshold { 1.0 } else { 0.0 })
        .collect();

    let mut d2 = Vec::with_capacity(options.n_calibrations);
    let mut auc = Vec::with_capacity(options.n_calibrations);
    for trial in 0..options.n_calibrations {
        let seed = options.seed.wrapping_add(trial as u64);
        let (train, test) = match groups {
            Some(g) => split_groups(g, options.train_fraction, seed)?,
            None => split_indices(probs.len(), options.train_fraction, seed)?,
        };

        let gather = |src: &[f64], idx: &[usize]| -> Vec<f64> {
            idx.iter().map(|&i| src[i]).collect()
        };
        let train_x = gather(probs, &train);
        let train_y = gather(&bin_labels, &train);
        let train_w = gather(weights, &train);
        let cal = if options.symmetrize {
            let (xs, ys, ws) = symmetrize(&train_x, &train_y, &train_w);
            IsotonicCalibrator::fit(&xs, &ys, &ws)?
        } else {
            IsotonicCalibrator::fit(&train_x, &train_y, &train_w)?
        };

        let test_x = gather(probs, &test);
        let test_y = gather(&bin_labels, &test);
        let test_w = gather(weights, &test);
        let calibrated = cal.transform(&test_x);

        d2.push(dilution_squared(&calibrated, &test_w));
        auc.push(weighted_auc(&test_y, &test_x, &test_w)?);
        debug!(trial, d2 = d2[trial], auc = auc[trial], "bootstrap trial");
    }

    let outcome = BootstrapOutcome { d2, auc };
    let (d2_mean, d2_std) = outcome.d2_mean_std();
    info!(
        trials = options.n_calibrations,
        d2_mean, d2_std, "bootstrap calibration done"
    );
    Ok(outcome)
}
