//! Two-fold out-of-sample calibration.
//!
//! Splits the input in half, fits one calibrator per fold, and scores each
//! fold with the *other* fold's calibrator, so every returned probability is
//! out of sample and the calibration curve itself cannot overfit the data it
//! is evaluated on. The fold split is seeded and fixed by default, making
//! repeated calls bit-identical.

use ft_common::{Error, Result};
use ft_math::weighted_mean;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{from_eta, symmetrize, to_eta, wrong_tag_labels, CalibrationMethod, FittedCalibrator};
use crate::split::{split_groups, split_indices};

/// Default fold-split seed. Fixed so that repeated calibrations of the same
/// data agree exactly; pass a different seed to draw a fresh partition.
pub const DEFAULT_SEED: u64 = 11;

/// Options for [`calibrate_probs`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOptions {
    /// Regression family used for both folds.
    pub method: CalibrationMethod,
    /// Mirror-augment each fold's fit data (see [`symmetrize`]).
    pub symmetrize: bool,
    /// Calibrate in the half-range mistag representation instead of the full
    /// probability range.
    pub eta_space: bool,
    /// Labels are binarized as `label > threshold`.
    pub threshold: f64,
    /// Fraction of samples (or groups) assigned to the first fold.
    pub train_fraction: f64,
    /// Fold-split seed.
    pub seed: u64,
    /// Retain the two fitted calibrators in the outcome.
    pub keep_calibrators: bool,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            method: CalibrationMethod::Isotonic,
            symmetrize: false,
            eta_space: false,
            threshold: 0.0,
            train_fraction: 0.5,
            seed: DEFAULT_SEED,
            keep_calibrators: false,
        }
    }
}

/// Result of a two-fold calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    /// Out-of-sample calibrated probabilities, aligned to the input order.
    pub probs: Vec<f64>,
    /// Weighted mean of `(1 - 2p)^2` over the full calibrated array.
    pub d2: f64,
    /// The per-fold calibrators, if requested. The first entry was fitted on
    /// the first fold (and scored the second), and vice versa.
    pub calibrators: Option<(FittedCalibrator, FittedCalibrator)>,
}

fn gather(values: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| values[i]).collect()
}

/// Calibrate the full input out of sample via two-fold cross-application.
///
/// `labels` may use either the {0, 1} or the {-1, +1} convention; they are
/// binarized at `options.threshold`. `groups`, when given, keeps all samples
/// of a group in the same fold. Probabilities outside [0, 1] are rejected
/// before any computation.
pub fn calibrate_probs(
    labels: &[f64],
    weights: &[f64],
    probs: &[f64],
    groups: Option<&[u64]>,
    options: &CalibrationOptions,
) -> Result<CalibrationOutcome> {
    Error::check_same_length(labels.len(), probs.len())?;
    Error::check_same_length(weights.len(), probs.len())?;
    if let Some(g) = groups {
        Error::check_same_length(g.len(), probs.len())?;
    }
    if probs.is_empty() {
        return Err(Error::EmptyInput("calibration needs samples"));
    }
    for &p in probs {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability(p));
        }
    }

    let bin_labels: Vec<f64> = labels
        .iter()
        .map(|&l| if l > options.threshold { 1.0 } else { 0.0 })
        .collect();

    let (fold_1, fold_2) = match groups {
        Some(g) => split_groups(g, options.train_fraction, options.seed)?,
        None => split_indices(probs.len(), options.train_fraction, options.seed)?,
    };
    debug!(
        n = probs.len(),
        fold_1 = fold_1.len(),
        fold_2 = fold_2.len(),
        method = %options.method,
        eta_space = options.eta_space,
        "two-fold calibration"
    );

    // In eta space the calibrated quantity is the mistag rate and the label
    // is "the tag was wrong"; otherwise scores and class labels go in as-is.
    let eta = options.eta_space.then(|| to_eta(probs));
    let (fit_x, fit_y): (Vec<f64>, Vec<f64>) = match &eta {
        Some(rec) => (rec.eta.clone(), wrong_tag_labels(&rec.tag, &bin_labels)),
        None => (probs.to_vec(), bin_labels),
    };

    let fit_fold = |idx: &[usize]| -> Result<FittedCalibrator> {
        let (x, y, w) = (
            gather(&fit_x, idx),
            gather(&fit_y, idx),
            gather(weights, idx),
        );
        if options.symmetrize {
            let (xs, ys, ws) = symmetrize(&x, &y, &w);
            FittedCalibrator::fit(options.method, &xs, &ys, &ws)
        } else {
            FittedCalibrator::fit(options.method, &x, &y, &w)
        }
    };
    let cal_1 = fit_fold(&fold_1)?;
    let cal_2 = fit_fold(&fold_2)?;

    // cross-application: never score a fold with its own calibrator
    let out_1 = cal_2.transform(&gather(&fit_x, &fold_1));
    let out_2 = cal_1.transform(&gather(&fit_x, &fold_2));

    let mut calibrated = vec![0.0; probs.len()];
    for (&i, &p) in fold_1.iter().zip(&out_1) {
        calibrated[i] = p;
    }
    for (&i, &p) in fold_2.iter().zip(&out_2) {
        calibrated[i] = p;
    }

    if let Some(rec) = &eta {
        calibrated = from_eta(&calibrated, &rec.tag);
    }

    let alpha: Vec<f64> = calibrated.iter().map(|&p| (1.0 - 2.0 * p).powi(2)).collect();
    let d2 = weighted_mean(&alpha, weights);
    info!(d2, "two-fold calibration done");

    Ok(CalibrationOutcome {
        probs: calibrated,
        d2,
        calibrators: options.keep_calibrators.then_some((cal_1, cal_2)),
    })
}
