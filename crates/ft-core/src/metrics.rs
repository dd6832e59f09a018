//! Weighted evaluation metrics for tagging performance.

use ft_common::{DecayPopulation, Error, Result};
use ft_math::weighted_mean;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weighted area under the ROC curve.
///
/// The positive class is `label > 0`, so both the {0, 1} and the {-1, +1}
/// conventions work unchanged. Tied scores receive the usual half credit
/// (trapezoid over the tie group). Errors if either class carries no weight,
/// since AUC is undefined there.
pub fn weighted_auc(labels: &[f64], scores: &[f64], weights: &[f64]) -> Result<f64> {
    Error::check_same_length(labels.len(), scores.len())?;
    Error::check_same_length(weights.len(), scores.len())?;
    if labels.is_empty() {
        return Err(Error::EmptyInput("AUC needs samples"));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let pos_total: f64 = labels
        .iter()
        .zip(weights)
        .filter(|(&l, _)| l > 0.0)
        .map(|(_, &w)| w)
        .sum();
    let neg_total: f64 = weights.iter().sum::<f64>() - pos_total;
    if pos_total <= 0.0 || neg_total <= 0.0 {
        return Err(Error::DegenerateClasses);
    }

    // sweep descending, handling tied scores as one ROC segment
    let mut area = 0.0;
    let mut tp = 0.0;
    let mut i = 0;
    while i < order.len() {
        let score = scores[order[i]];
        let mut d_tp = 0.0;
        let mut d_fp = 0.0;
        while i < order.len() && scores[order[i]] == score {
            let idx = order[i];
            if labels[idx] > 0.0 {
                d_tp += weights[idx];
            } else {
                d_fp += weights[idx];
            }
            i += 1;
        }
        area += d_fp * (tp + d_tp / 2.0);
        tp += d_tp;
    }
    Ok(area / (pos_total * neg_total))
}

/// Dilution-squared: weighted mean of `(1 - 2p)^2`.
///
/// 0 for uninformative probabilities, 1 for perfectly confident ones.
pub fn dilution_squared(probs: &[f64], weights: &[f64]) -> f64 {
    let alpha: Vec<f64> = probs.iter().map(|&p| (1.0 - 2.0 * p).powi(2)).collect();
    weighted_mean(&alpha, weights)
}

/// AUC of the tagged sample alone and of the full sample including the
/// events the tagger declined to tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UntaggedAuc {
    /// AUC over the tagged events only.
    pub tagged: f64,
    /// AUC after appending the untagged remainder at probability 0.5,
    /// split evenly between the two signs.
    pub full: f64,
}

/// Account for untagged events when scoring the tagger.
///
/// The untagged remainder (`population.n_b_decays` minus the tagged sWeight
/// sum) is represented by two pseudo-events at probability 0.5, one per
/// sign, each carrying half the remainder's weight. Scored at chance, they
/// dilute the AUC toward 0.5 in proportion to how much of the sample went
/// untagged.
pub fn auc_with_untagged(
    signs: &[f64],
    probs: &[f64],
    weights: &[f64],
    population: &DecayPopulation,
) -> Result<UntaggedAuc> {
    let tagged = weighted_auc(signs, probs, weights)?;

    let remainder = population.n_b_decays - weights.iter().sum::<f64>();
    let mut full_signs = signs.to_vec();
    let mut full_probs = probs.to_vec();
    let mut full_weights = weights.to_vec();
    full_signs.extend([-1.0, 1.0]);
    full_probs.extend([0.5, 0.5]);
    full_weights.extend([remainder / 2.0, remainder / 2.0]);

    let full = weighted_auc(&full_signs, &full_probs, &full_weights)?;
    Ok(UntaggedAuc { tagged, full })
}
