//! Score calibration.
//!
//! Turns raw classifier scores into well-behaved probabilities. Two
//! regression families are available behind one interface: isotonic (a
//! monotone step map, the default) and logistic (a smooth sigmoid
//! recalibration in log-odds space). The two-fold engine in [`twofold`]
//! always calibrates out of sample: each half of the data is scored by the
//! calibrator fitted on the other half.

pub mod eta;
pub mod isotonic;
pub mod logistic;
pub mod symmetry;
pub mod twofold;

pub use eta::{from_eta, to_eta, wrong_tag_labels, EtaRecord};
pub use isotonic::IsotonicCalibrator;
pub use logistic::LogisticCalibrator;
pub use symmetry::symmetrize;
pub use twofold::{calibrate_probs, CalibrationOptions, CalibrationOutcome};

use ft_common::Result;
use serde::{Deserialize, Serialize};

/// Which regression family recalibrates raw scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationMethod {
    /// Monotone non-decreasing step map (weighted pool-adjacent-violators).
    #[default]
    Isotonic,
    /// Sigmoid recalibration fitted on the log-odds of the score.
    Logistic,
}

impl std::fmt::Display for CalibrationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationMethod::Isotonic => write!(f, "isotonic"),
            CalibrationMethod::Logistic => write!(f, "logistic"),
        }
    }
}

/// A fitted per-fold calibration mapping.
///
/// Created per fold per calibration call; retained only when the caller asks
/// for the fitted pair (for inspection or re-application).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FittedCalibrator {
    Isotonic(IsotonicCalibrator),
    Logistic(LogisticCalibrator),
}

impl FittedCalibrator {
    /// Fit the selected method on weighted, labeled scores.
    pub fn fit(
        method: CalibrationMethod,
        scores: &[f64],
        labels: &[f64],
        weights: &[f64],
    ) -> Result<Self> {
        match method {
            CalibrationMethod::Isotonic => {
                IsotonicCalibrator::fit(scores, labels, weights).map(FittedCalibrator::Isotonic)
            }
            CalibrationMethod::Logistic => {
                LogisticCalibrator::fit(scores, labels, weights).map(FittedCalibrator::Logistic)
            }
        }
    }

    /// Map scores through the fitted calibration. Output lies in [0, 1].
    pub fn transform(&self, scores: &[f64]) -> Vec<f64> {
        match self {
            FittedCalibrator::Isotonic(c) => c.transform(scores),
            FittedCalibrator::Logistic(c) => c.transform(scores),
        }
    }
}
