//! Logistic recalibration in log-odds space.
//!
//! Fits a single-feature weighted logistic regression on `logit(score)`, so
//! the learned map is a smooth sigmoid `p = expit(a + b * logit(s))`. Scores
//! are clipped away from {0, 1} before the transform, at fit and at predict
//! time. The slope carries a mild L2 penalty (`1/C`, C = 100); the intercept
//! is not penalized.

use ft_common::{Error, Result};
use ft_math::{clipped_logit, expit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inverse regularization constant; the slope penalty is `1/C`.
const C: f64 = 100.0;
/// Newton-Raphson iteration cap.
const MAX_ITER: usize = 100;
/// Convergence threshold on the step norm.
const STEP_TOL: f64 = 1e-10;
/// Per-iteration cap on parameter movement, keeps degenerate fits bounded.
const MAX_STEP: f64 = 10.0;

/// A fitted logistic calibration map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticCalibrator {
    intercept: f64,
    slope: f64,
}

impl LogisticCalibrator {
    /// Fit on weighted, labeled scores by Newton-Raphson.
    ///
    /// Single-class folds converge to a saturated constant map; that is a
    /// valid (if useless) calibration, not an error.
    pub fn fit(scores: &[f64], labels: &[f64], weights: &[f64]) -> Result<Self> {
        Error::check_same_length(scores.len(), labels.len())?;
        Error::check_same_length(scores.len(), weights.len())?;
        if scores.is_empty() {
            return Err(Error::EmptyInput("logistic fit needs samples"));
        }

        let xs: Vec<f64> = scores.iter().map(|&s| clipped_logit(s)).collect();
        let lambda = 1.0 / C;

        let mut a = 0.0f64;
        let mut b = 0.0f64;
        for iter in 0..MAX_ITER {
            let mut g_a = 0.0;
            let mut g_b = -lambda * b;
            let mut h_aa = 0.0;
            let mut h_ab = 0.0;
            let mut h_bb = -lambda;
            for ((&x, &y), &w) in xs.iter().zip(labels).zip(weights) {
                let p = expit(a + b * x);
                let r = w * (y - p);
                let v = w * p * (1.0 - p);
                g_a += r;
                g_b += r * x;
                h_aa -= v;
                h_ab -= v * x;
                h_bb -= v * x * x;
            }

            let det = h_aa * h_bb - h_ab * h_ab;
            if det.abs() < 1e-300 {
                debug!(iter, "logistic fit: singular Hessian, stopping");
                break;
            }
            // Newton step: delta = -H^{-1} g
            let da = (-(h_bb * g_a - h_ab * g_b) / det).clamp(-MAX_STEP, MAX_STEP);
            let db = (-(h_aa * g_b - h_ab * g_a) / det).clamp(-MAX_STEP, MAX_STEP);
            a += da;
            b += db;
            if da.abs().max(db.abs()) < STEP_TOL {
                break;
            }
        }

        debug!(intercept = a, slope = b, "logistic calibration fitted");
        Ok(Self {
            intercept: a,
            slope: b,
        })
    }

    /// Map scores through the fitted sigmoid. Output lies in [0, 1].
    pub fn transform(&self, scores: &[f64]) -> Vec<f64> {
        scores
            .iter()
            .map(|&s| expit(self.intercept + self.slope * clipped_logit(s)))
            .collect()
    }

    /// The fitted (intercept, slope) pair in log-odds space.
    pub fn coefficients(&self) -> (f64, f64) {
        (self.intercept, self.slope)
    }
}
