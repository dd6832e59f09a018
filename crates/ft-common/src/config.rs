//! Source-dataset population constants.
//!
//! The untagged-AUC computation needs to know how many B decays the source
//! dataset contained in total, which is a property of the dataset, not of the
//! tagger. The count lives in an explicit configuration record rather than a
//! process-wide constant, so alternative datasets can supply their own
//! numbers and analyses can serialize the constants they ran with.

use serde::{Deserialize, Serialize};

/// Total B decays in the reference dataset (sum of sWeights in the source
/// sample).
pub const N_B_DECAYS: f64 = 7.42867714256286621e5;

/// B-decay population of the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPopulation {
    /// Number of B decays (sWeight sum over the full sample).
    pub n_b_decays: f64,
    /// Effective statistical count, slightly larger than the raw sWeight sum.
    pub n_b_decays_stat: f64,
}

impl Default for DecayPopulation {
    fn default() -> Self {
        Self {
            n_b_decays: N_B_DECAYS,
            n_b_decays_stat: N_B_DECAYS * 1.1,
        }
    }
}

impl DecayPopulation {
    /// Population with an explicit decay count and the default stat factor.
    pub fn with_decays(n_b_decays: f64) -> Self {
        Self {
            n_b_decays,
            n_b_decays_stat: n_b_decays * 1.1,
        }
    }

    /// Fraction of the population the tagger tagged, from the tagged
    /// sWeight sum.
    pub fn tagging_efficiency(&self, tagged_weight: f64) -> f64 {
        tagged_weight / self.n_b_decays
    }

    /// Binomial uncertainty on the tagging efficiency, evaluated against the
    /// effective statistical count.
    pub fn tagging_efficiency_delta(&self, tagged_weight: f64) -> f64 {
        let eff = self.tagging_efficiency(tagged_weight);
        (eff * (1.0 - eff) / self.n_b_decays_stat).sqrt()
    }
}
