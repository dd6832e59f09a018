//! Mirror-augmentation for symmetric calibration.
//!
//! When the two classes are physically symmetric (particle/antiparticle),
//! the calibration map should satisfy `f(x) + f(1 - x) = 1`. Fitting on the
//! original samples plus a sign-flipped mirror copy, each at half weight,
//! pushes the fit toward that symmetry without changing the total weight.

/// Augment a fit set with its mirror image.
///
/// Returns `(scores, labels, weights)` of length `2n`: the originals at half
/// weight followed by `(1 - score, 1 - label)` copies at the same half
/// weight.
pub fn symmetrize(
    scores: &[f64],
    labels: &[f64],
    weights: &[f64],
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = scores.len();
    let mut out_scores = Vec::with_capacity(2 * n);
    let mut out_labels = Vec::with_capacity(2 * n);
    let mut out_weights = Vec::with_capacity(2 * n);

    out_scores.extend_from_slice(scores);
    out_labels.extend_from_slice(labels);
    out_weights.extend(weights.iter().map(|w| 0.5 * w));

    out_scores.extend(scores.iter().map(|s| 1.0 - s));
    out_labels.extend(labels.iter().map(|y| 1.0 - y));
    out_weights.extend(weights.iter().map(|w| 0.5 * w));

    (out_scores, out_labels, out_weights)
}
