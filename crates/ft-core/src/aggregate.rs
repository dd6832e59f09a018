//! Per-event combination of per-track probabilities.
//!
//! Each track contributes its calibrated probability as a log-odds term,
//! signed by whether the track's tag agrees with the event hypothesis:
//! `logit(P_event) = sum_i sign_track_i * logit(p_i)`. Events whose tracks
//! carry no net information (an exactly cancelling or empty sum) come out
//! non-finite and are clamped to 0.5 — untagged by business rule, not error.

use ft_common::{Error, Result, TrackTable};
use ft_math::{expit, logit};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Options for [`aggregate_event_probs`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Balance same-sign vs opposite-sign track populations within each true
    /// B-sign class before summing, correcting a known labeling asymmetry.
    pub normed_signs: bool,
}

/// Aggregated per-event results, ordered by ascending event id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAggregates {
    /// Distinct event ids, ascending.
    pub event_id: Vec<u64>,
    /// Mean true B sign over member tracks (defensive against label noise;
    /// exactly the event's sign when the column is group-homogeneous).
    pub sign: Vec<f64>,
    /// Mean sWeight over member tracks.
    pub weight: Vec<f64>,
    /// Aggregated probability of the positive hypothesis, in [0, 1].
    pub prob: Vec<f64>,
    /// How many events came out non-finite and were clamped to 0.5.
    pub untagged: usize,
}

/// Combine per-track calibrated probabilities into per-event probabilities.
pub fn aggregate_event_probs(
    table: &TrackTable,
    probs: &[f64],
    options: &AggregateOptions,
) -> Result<EventAggregates> {
    Error::check_same_length(table.len(), probs.len())?;
    if table.is_empty() {
        return Err(Error::EmptyInput("aggregation needs tracks"));
    }

    let mut event_id: Vec<u64> = table.event_id.clone();
    event_id.sort_unstable();
    event_id.dedup();
    let index_of = |id: u64| -> usize {
        // event_id is sorted and deduplicated, so this always finds the id
        event_id.partition_point(|&e| e < id)
    };

    let norm = options
        .normed_signs
        .then(|| sign_balance_factors(table))
        .unwrap_or([1.0, 1.0]);

    let n_events = event_id.len();
    let mut log_odds = vec![0.0f64; n_events];
    let mut sign_sum = vec![0.0f64; n_events];
    let mut weight_sum = vec![0.0f64; n_events];
    let mut counts = vec![0usize; n_events];

    for i in 0..table.len() {
        let e = index_of(table.event_id[i]);
        let same_sign = table.sign_track[i] * table.sign_b[i] > 0.0;
        let factor = if same_sign { norm[class_of(table.sign_b[i])] } else { 1.0 };
        log_odds[e] += logit(probs[i]) * table.sign_track[i] * factor;
        sign_sum[e] += table.sign_b[i];
        weight_sum[e] += table.weight[i];
        counts[e] += 1;
    }

    let mut untagged = 0;
    let prob: Vec<f64> = log_odds
        .iter()
        .map(|&lo| {
            let p = expit(lo);
            if p.is_finite() {
                p
            } else {
                untagged += 1;
                0.5
            }
        })
        .collect();
    if untagged > 0 {
        debug!(untagged, "events clamped to 0.5");
    }

    let sign: Vec<f64> = sign_sum
        .iter()
        .zip(&counts)
        .map(|(&s, &n)| s / n as f64)
        .collect();
    let weight: Vec<f64> = weight_sum
        .iter()
        .zip(&counts)
        .map(|(&w, &n)| w / n as f64)
        .collect();

    Ok(EventAggregates {
        event_id,
        sign,
        weight,
        prob,
        untagged,
    })
}

fn class_of(sign_b: f64) -> usize {
    usize::from(sign_b > 0.0)
}

/// Class-conditional count ratios balancing the same-sign population against
/// the opposite-sign one. Index 0 is the negative B-sign class, index 1 the
/// positive one.
///
/// A class with no same-sign tracks makes its ratio non-finite; that
/// propagates through the affected events' log-odds, and the downstream
/// clamp turns them into untagged. The condition is logged rather than
/// patched over with an arbitrary constant.
fn sign_balance_factors(table: &TrackTable) -> [f64; 2] {
    let mut same = [0usize; 2];
    let mut opposite = [0usize; 2];
    for i in 0..table.len() {
        let class = class_of(table.sign_b[i]);
        if table.sign_track[i] * table.sign_b[i] > 0.0 {
            same[class] += 1;
        } else {
            opposite[class] += 1;
        }
    }
    let factors = [
        opposite[0] as f64 / same[0] as f64,
        opposite[1] as f64 / same[1] as f64,
    ];
    if !factors.iter().all(|f| f.is_finite()) {
        warn!(?factors, "sign balancing is ill-defined: a class has no same-sign tracks");
    }
    factors
}
