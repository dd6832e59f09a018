//! Weighted sample statistics.
//!
//! The calibration pipeline works on sWeighted samples throughout, so every
//! reduction here takes an explicit weight slice. Degenerate inputs (empty
//! slices, zero total weight) yield NaN rather than an error.

/// Weighted arithmetic mean. NaN for empty input or zero total weight.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    assert_eq!(values.len(), weights.len(), "values/weights length mismatch");
    let total: f64 = weights.iter().sum();
    if values.is_empty() || total == 0.0 {
        return f64::NAN;
    }
    let acc: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    acc / total
}

/// Weighted population standard deviation. NaN for degenerate input.
pub fn weighted_std(values: &[f64], weights: &[f64]) -> f64 {
    let mean = weighted_mean(values, weights);
    if mean.is_nan() {
        return f64::NAN;
    }
    let sq: Vec<f64> = values.iter().map(|v| (v - mean) * (v - mean)).collect();
    weighted_mean(&sq, weights).sqrt()
}

/// Unweighted mean. NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unweighted population standard deviation. NaN for empty input.
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    if m.is_nan() {
        return f64::NAN;
    }
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Weighted quantiles via the inverted CDF.
///
/// For each `q` in `qs` (in [0, 1]) returns the smallest value whose
/// cumulative weight reaches `q` times the total weight. Values are sorted
/// internally; NaN weights or values make the result unspecified.
pub fn weighted_quantiles(values: &[f64], weights: &[f64], qs: &[f64]) -> Vec<f64> {
    assert_eq!(values.len(), weights.len(), "values/weights length mismatch");
    let total: f64 = weights.iter().sum();
    if values.is_empty() || total == 0.0 {
        return vec![f64::NAN; qs.len()];
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    qs.iter()
        .map(|&q| {
            let target = q.clamp(0.0, 1.0) * total;
            let mut cum = 0.0;
            for &i in &order {
                cum += weights[i];
                if cum >= target {
                    return values[i];
                }
            }
            values[order[order.len() - 1]]
        })
        .collect()
}
