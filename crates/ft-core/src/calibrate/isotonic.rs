//! Weighted isotonic regression.
//!
//! Fits a monotone non-decreasing step function minimizing weighted squared
//! error via pool-adjacent-violators, then predicts by linear interpolation
//! between the fitted knots. Out-of-domain inputs clamp to the boundary
//! values instead of extrapolating.

use ft_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A fitted isotonic calibration map.
///
/// `knots_x` is strictly increasing; `knots_y` is non-decreasing and lies in
/// [0, 1]. Blocks of pooled samples contribute a flat segment (two knots with
/// equal `y`); prediction ramps linearly between adjacent blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsotonicCalibrator {
    knots_x: Vec<f64>,
    knots_y: Vec<f64>,
}

/// One maximal pooled block during the PAVA sweep.
struct Block {
    x_min: f64,
    x_max: f64,
    sum_wy: f64,
    sum_w: f64,
}

impl Block {
    fn mean(&self) -> f64 {
        self.sum_wy / self.sum_w
    }
}

impl IsotonicCalibrator {
    /// Fit on weighted, labeled scores.
    ///
    /// Zero-weight samples are dropped before fitting. A single-class input
    /// produces a constant (valid but uninformative) map; an input with no
    /// positive weight is rejected.
    pub fn fit(scores: &[f64], labels: &[f64], weights: &[f64]) -> Result<Self> {
        Error::check_same_length(scores.len(), labels.len())?;
        Error::check_same_length(scores.len(), weights.len())?;

        let mut order: Vec<usize> = (0..scores.len()).filter(|&i| weights[i] > 0.0).collect();
        if order.is_empty() {
            return Err(Error::EmptyInput("isotonic fit needs positive weight"));
        }
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(Ordering::Equal)
        });

        // merge ties in x, then pool adjacent violators
        let mut blocks: Vec<Block> = Vec::with_capacity(order.len());
        for &i in &order {
            let (x, wy, w) = (scores[i], weights[i] * labels[i], weights[i]);
            match blocks.last_mut() {
                Some(last) if last.x_max == x => {
                    last.sum_wy += wy;
                    last.sum_w += w;
                }
                _ => blocks.push(Block {
                    x_min: x,
                    x_max: x,
                    sum_wy: wy,
                    sum_w: w,
                }),
            }
            while blocks.len() >= 2 {
                let n = blocks.len();
                if blocks[n - 1].mean() >= blocks[n - 2].mean() {
                    break;
                }
                let top = blocks.swap_remove(n - 1);
                let prev = &mut blocks[n - 2];
                prev.x_max = top.x_max;
                prev.sum_wy += top.sum_wy;
                prev.sum_w += top.sum_w;
            }
        }

        let mut knots_x = Vec::with_capacity(blocks.len() * 2);
        let mut knots_y = Vec::with_capacity(blocks.len() * 2);
        for b in &blocks {
            let y = b.mean().clamp(0.0, 1.0);
            knots_x.push(b.x_min);
            knots_y.push(y);
            if b.x_max > b.x_min {
                knots_x.push(b.x_max);
                knots_y.push(y);
            }
        }
        Ok(Self { knots_x, knots_y })
    }

    /// Map scores through the fitted step function.
    ///
    /// Interpolates linearly inside the fitted domain, clamps to the boundary
    /// values outside it. NaN inputs map to NaN.
    pub fn transform(&self, scores: &[f64]) -> Vec<f64> {
        scores.iter().map(|&s| self.transform_one(s)).collect()
    }

    fn transform_one(&self, s: f64) -> f64 {
        if s.is_nan() {
            return f64::NAN;
        }
        let n = self.knots_x.len();
        if s <= self.knots_x[0] {
            return self.knots_y[0];
        }
        if s >= self.knots_x[n - 1] {
            return self.knots_y[n - 1];
        }
        // first knot strictly above s; the guards ensure 1 <= hi <= n-1
        let hi = self.knots_x.partition_point(|&x| x <= s);
        let (x0, x1) = (self.knots_x[hi - 1], self.knots_x[hi]);
        let (y0, y1) = (self.knots_y[hi - 1], self.knots_y[hi]);
        if x1 == x0 {
            return y0;
        }
        (y0 + (s - x0) * (y1 - y0) / (x1 - x0)).clamp(0.0, 1.0)
    }

    /// The fitted knots as (x, y) pairs.
    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.knots_x
            .iter()
            .copied()
            .zip(self.knots_y.iter().copied())
    }
}
