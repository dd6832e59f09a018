//! Binned mistag diagnostics.
//!
//! Compares predicted mistag rates against the observed wrong-tag fraction,
//! bin by bin, as the standard check that calibrated tags mean what they
//! say. Bins are either uniform over the half-range [0, 0.5] or placed at
//! weighted quantiles of the predicted distribution; quantile binning on
//! data with few distinct values recovers by decrementing the bin count
//! until the edges are usable.

use ft_common::{Error, Result};
use ft_math::weighted_quantiles;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How to place mistag bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MistagBinning {
    /// `n` equal-width bins over [0, 0.5].
    Uniform(usize),
    /// `n` bins holding equal weight, edges at weighted quantiles.
    Quantile(usize),
}

/// One bin of the mistag diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistagBin {
    /// Bin lower edge (inclusive).
    pub lower: f64,
    /// Bin upper edge (exclusive, except for the last bin).
    pub upper: f64,
    /// Weighted mean predicted mistag rate in this bin.
    pub mean_predicted: f64,
    /// Weighted fraction of events whose tag was actually wrong.
    pub observed: f64,
    /// Binomial uncertainty of the observed fraction.
    pub error: f64,
    /// Total weight in this bin.
    pub weight: f64,
    /// Number of events in this bin.
    pub count: usize,
}

/// Build the mistag diagnostic from per-event probabilities.
///
/// `labels` carry the true sign (`> 0` is the positive class, so both
/// conventions work); tags and predicted mistag rates are derived from
/// `probs`. An exactly uninformative probability (p = 0.5) counts as a
/// wrong tag.
pub fn mistag_curve(
    probs: &[f64],
    labels: &[f64],
    weights: &[f64],
    binning: MistagBinning,
) -> Result<Vec<MistagBin>> {
    Error::check_same_length(probs.len(), labels.len())?;
    Error::check_same_length(probs.len(), weights.len())?;
    if probs.is_empty() {
        return Err(Error::EmptyInput("mistag curve needs events"));
    }

    let eta: Vec<f64> = probs.iter().map(|&p| 0.5 * (1.0 - (2.0 * p - 1.0).abs())).collect();
    let wrong: Vec<f64> = probs
        .iter()
        .zip(labels)
        .map(|(&p, &l)| {
            let tag = 2.0 * p - 1.0;
            let class_sign = if l > 0.0 { 1.0 } else { -1.0 };
            if tag * class_sign > 0.0 {
                0.0
            } else {
                1.0
            }
        })
        .collect();

    let edges = bin_edges(&eta, weights, binning)?;
    let n_bins = edges.len() - 1;
    let mut sums = vec![(0.0f64, 0.0f64, 0.0f64, 0usize); n_bins]; // (w, w*eta, w*wrong, n)
    for ((&e, &w), &y) in eta.iter().zip(weights).zip(&wrong) {
        // last edge is inclusive so the maximum lands in the last bin
        let idx = edges[1..n_bins].partition_point(|&edge| edge <= e);
        let entry = &mut sums[idx];
        entry.0 += w;
        entry.1 += w * e;
        entry.2 += w * y;
        entry.3 += 1;
    }

    Ok(sums
        .iter()
        .enumerate()
        .map(|(i, &(w, we, wy, n))| {
            let observed = if w > 0.0 { wy / w } else { 0.0 };
            MistagBin {
                lower: edges[i],
                upper: edges[i + 1],
                mean_predicted: if w > 0.0 { we / w } else { f64::NAN },
                observed,
                error: if n > 0 {
                    (observed * (1.0 - observed) / n as f64).sqrt()
                } else {
                    0.0
                },
                weight: w,
                count: n,
            }
        })
        .collect())
}

/// Compute bin edges, decrementing the quantile bin count until the edges
/// are strictly increasing.
fn bin_edges(eta: &[f64], weights: &[f64], binning: MistagBinning) -> Result<Vec<f64>> {
    match binning {
        MistagBinning::Uniform(n) => {
            let n = n.max(1);
            Ok((0..=n).map(|i| 0.5 * i as f64 / n as f64).collect())
        }
        MistagBinning::Quantile(n) => {
            let requested = n.max(1);
            let mut bins = requested;
            while bins >= 1 {
                let qs: Vec<f64> = (0..=bins).map(|i| i as f64 / bins as f64).collect();
                let edges = weighted_quantiles(eta, weights, &qs);
                if edges.windows(2).all(|pair| pair[0] < pair[1]) {
                    if bins < requested {
                        debug!(requested, used = bins, "quantile binning degraded");
                    }
                    return Ok(edges);
                }
                bins -= 1;
            }
            Err(Error::BinningFailed { bins: requested })
        }
    }
}
