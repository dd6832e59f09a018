//! Property-based tests for ft-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use ft_math::{
    clip, clipped_logit, expit, logit, mean, weighted_mean, weighted_quantiles, weighted_std,
    PROB_CLIP,
};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// expit inverts logit on the open unit interval.
    #[test]
    fn expit_inverts_logit(p in 1e-6..=(1.0 - 1e-6)) {
        let back = expit(logit(p));
        prop_assert!(approx_eq(back, p, TOL), "expit(logit({})) = {}", p, back);
    }

    /// logit inverts expit where 1 - expit(x) still has full precision.
    #[test]
    fn logit_inverts_expit(x in -15.0..15.0f64) {
        let back = logit(expit(x));
        prop_assert!(approx_eq(back, x, 1e-7), "logit(expit({})) = {}", x, back);
    }

    /// logit is strictly increasing.
    #[test]
    fn logit_monotone(a in 1e-6..=0.5f64, delta in 1e-6..=0.4f64) {
        let b = (a + delta).min(1.0 - 1e-6);
        prop_assert!(logit(a) < logit(b), "logit({}) >= logit({})", a, b);
    }

    /// expit output always lies in [0, 1].
    #[test]
    fn expit_in_unit_interval(x in -1e6..1e6f64) {
        let y = expit(x);
        prop_assert!((0.0..=1.0).contains(&y), "expit({}) = {}", x, y);
    }

    /// The point symmetry expit(-x) = 1 - expit(x).
    #[test]
    fn expit_point_symmetry(x in -30.0..30.0f64) {
        prop_assert!(approx_eq(expit(-x), 1.0 - expit(x), TOL));
    }

    /// clipped_logit is finite everywhere on [0, 1] and bounded by the clip.
    #[test]
    fn clipped_logit_bounded(p in 0.0..=1.0f64) {
        let x = clipped_logit(p);
        let bound = logit(1.0 - PROB_CLIP);
        prop_assert!(x.is_finite());
        prop_assert!(x.abs() <= bound + TOL, "|{}| > {}", x, bound);
    }

    /// clip keeps values inside the interval.
    #[test]
    fn clip_within_bounds(x in -10.0..10.0f64, lo in -5.0..0.0f64, hi in 0.0..5.0f64) {
        let y = clip(x, lo, hi);
        prop_assert!(y >= lo && y <= hi);
    }

    /// Weighted mean lies between min and max of the values.
    #[test]
    fn weighted_mean_bounded(
        values in prop::collection::vec(-100.0..100.0f64, 1..50),
        seed in any::<u64>(),
    ) {
        // derive positive weights from the seed, deterministic per case
        let weights: Vec<f64> = (0..values.len())
            .map(|i| 0.1 + ((seed.wrapping_add(i as u64) % 97) as f64) / 10.0)
            .collect();
        let m = weighted_mean(&values, &weights);
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= lo - TOL && m <= hi + TOL, "{} outside [{}, {}]", m, lo, hi);
    }

    /// Uniform weights reduce the weighted mean to the plain mean.
    #[test]
    fn weighted_mean_uniform(values in prop::collection::vec(-50.0..50.0f64, 1..40)) {
        let weights = vec![1.0; values.len()];
        prop_assert!(approx_eq(weighted_mean(&values, &weights), mean(&values), 1e-8));
    }

    /// Standard deviation is non-negative and zero for constant data.
    #[test]
    fn weighted_std_nonnegative(v in -100.0..100.0f64, n in 1usize..30) {
        let values = vec![v; n];
        let weights = vec![1.0; n];
        let s = weighted_std(&values, &weights);
        prop_assert!(approx_eq(s, 0.0, TOL), "std of constant data = {}", s);
    }

    /// Quantiles are monotone in q and bounded by the data range.
    #[test]
    fn quantiles_monotone(values in prop::collection::vec(-100.0..100.0f64, 1..50)) {
        let weights = vec![1.0; values.len()];
        let qs = [0.0, 0.25, 0.5, 0.75, 1.0];
        let out = weighted_quantiles(&values, &weights, &qs);
        for pair in out.windows(2) {
            prop_assert!(pair[0] <= pair[1] + TOL, "quantiles not monotone: {:?}", out);
        }
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(out[0] >= lo - TOL && out[4] <= hi + TOL);
    }
}
