//! Half-range (mistag) representation.
//!
//! A tag probability `p` splits into a tag decision and a mistag rate:
//! dilution `d = 2p - 1`, tag `t = sign(d)`, mistag `eta = 0.5 (1 - |d|)`
//! in [0, 0.5]. Calibrating `eta` against "was the tag wrong" instead of `p`
//! against the class label enforces the physically expected symmetry between
//! the two tag decisions, and only half the domain has to be learned.

use ft_math::{clip, ETA_CLIP_HI, PROB_CLIP};
use serde::{Deserialize, Serialize};

/// Half-range view of a probability array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaRecord {
    /// Mistag rates, clipped to `[PROB_CLIP, ETA_CLIP_HI]`.
    pub eta: Vec<f64>,
    /// Tag decisions in {-1, 0, +1}; 0 marks an exactly uninformative score.
    pub tag: Vec<f64>,
}

fn sign(d: f64) -> f64 {
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        d // keeps 0 and propagates NaN
    }
}

/// Project probabilities into the half-range representation.
pub fn to_eta(probs: &[f64]) -> EtaRecord {
    let mut eta = Vec::with_capacity(probs.len());
    let mut tag = Vec::with_capacity(probs.len());
    for &p in probs {
        let d = 2.0 * p - 1.0;
        eta.push(clip(0.5 * (1.0 - d.abs()), PROB_CLIP, ETA_CLIP_HI));
        tag.push(sign(d));
    }
    EtaRecord { eta, tag }
}

/// Reconstruct full-range probabilities: `p = 0.5 (1 + (1 - 2 eta) tag)`.
///
/// Accepts calibrated mistag rates anywhere in [0, 1]; a rate above 0.5
/// effectively flips the tag, which is the intended reading.
pub fn from_eta(eta: &[f64], tag: &[f64]) -> Vec<f64> {
    eta.iter()
        .zip(tag)
        .map(|(&e, &t)| 0.5 * (1.0 + (1.0 - 2.0 * e) * t))
        .collect()
}

/// Calibration labels in the half-range view: 1.0 where the tag disagrees
/// with the true class, 0.0 where it agrees.
///
/// `labels` are the binarized {0, 1} class labels; an uninformative tag
/// (t = 0) counts as wrong, since it never matches either class sign.
pub fn wrong_tag_labels(tag: &[f64], labels: &[f64]) -> Vec<f64> {
    tag.iter()
        .zip(labels)
        .map(|(&t, &y)| {
            let class_sign = 2.0 * y - 1.0;
            if t * class_sign > 0.0 {
                0.0
            } else {
                1.0
            }
        })
        .collect()
}
