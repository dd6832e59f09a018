//! Tagging performance summary.
//!
//! Reduces bootstrap trial arrays into the quantities a tagging analysis
//! reports: D2 with its spread, the effective tagging efficiency
//! `epsilon = epsilon_tag * D2` with propagated relative errors, and the
//! full-sample AUC. All quantities are kept as fractions; rendering (tables,
//! percent signs) is the caller's concern.

use ft_math::{mean, std_dev};
use serde::{Deserialize, Serialize};

/// Reduced tagging performance figures for one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingSummary {
    /// Model name used in reports.
    pub name: String,
    /// Fraction of events the tagger tagged.
    pub tagging_efficiency: f64,
    /// Standard error of the tagging efficiency.
    pub tagging_efficiency_delta: f64,
    /// Mean D2 over bootstrap trials.
    pub d2: f64,
    /// Standard deviation of D2 over bootstrap trials.
    pub d2_delta: f64,
    /// Effective tagging efficiency `epsilon_tag * D2`.
    pub effective_efficiency: f64,
    /// Propagated uncertainty of the effective efficiency.
    pub effective_efficiency_delta: f64,
    /// Mean AUC over trials (full-sample AUC when the trials used it).
    pub auc: f64,
    /// Standard deviation of the AUC trials.
    pub auc_delta: f64,
}

impl TaggingSummary {
    /// Reduce bootstrap trial arrays into a summary row.
    ///
    /// The effective-efficiency uncertainty combines the relative spreads of
    /// D2 and the tagging efficiency in quadrature.
    pub fn from_trials(
        name: impl Into<String>,
        tagging_efficiency: f64,
        tagging_efficiency_delta: f64,
        d2_trials: &[f64],
        auc_trials: &[f64],
    ) -> Self {
        let d2 = mean(d2_trials);
        let d2_delta = std_dev(d2_trials);
        let effective_efficiency = tagging_efficiency * d2;
        let relative = ((d2_delta / d2).powi(2)
            + (tagging_efficiency_delta / tagging_efficiency).powi(2))
        .sqrt();
        Self {
            name: name.into(),
            tagging_efficiency,
            tagging_efficiency_delta,
            d2,
            d2_delta,
            effective_efficiency,
            effective_efficiency_delta: relative * effective_efficiency,
            auc: mean(auc_trials),
            auc_delta: std_dev(auc_trials),
        }
    }
}
