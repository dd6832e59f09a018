//! End-to-end calibration scenarios.
//!
//! Exercises the full pipeline on synthetic data with known answers:
//! separable scores, pure noise, per-event aggregation, and the bootstrap
//! evaluation on top of the two-fold calibration.

use ft_common::{DecayPopulation, TrackTable};
use ft_core::{
    aggregate_event_probs, auc_with_untagged, bootstrap_calibrate_prob, calibrate_probs,
    AggregateOptions, BootstrapOptions, CalibrationMethod, CalibrationOptions, TaggingSummary,
};

/// Deterministic scores spread over (0, 1).
fn synthetic_scores(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| ((i * 2654435761) % 10_000) as f64 / 10_000.0 + 5e-5)
        .collect()
}

#[test]
fn separable_sample_calibrates_to_confident_monotone_probs() {
    let n = 1000;
    let probs = synthetic_scores(n);
    let labels: Vec<f64> = probs.iter().map(|&p| if p > 0.5 { 1.0 } else { 0.0 }).collect();
    let weights = vec![1.0; n];

    let opts = CalibrationOptions {
        keep_calibrators: true,
        ..Default::default()
    };
    let out = calibrate_probs(&labels, &weights, &probs, None, &opts).unwrap();

    assert!(out.d2 > 0.9, "noise-free separable data: D2 = {}", out.d2);

    // each fold's calibration map is monotone in the raw score
    let probe: Vec<f64> = (0..=1000).map(|i| i as f64 / 1000.0).collect();
    let (cal_1, cal_2) = out.calibrators.as_ref().unwrap();
    for cal in [cal_1, cal_2] {
        let curve = cal.transform(&probe);
        for pair in curve.windows(2) {
            assert!(pair[0] <= pair[1] + 1e-12, "calibration map not monotone");
        }
    }

    // the two classes are near-perfectly separated
    let misassigned = labels
        .iter()
        .zip(&out.probs)
        .filter(|(&y, &p)| (y - p).abs() > 0.5)
        .count();
    assert!(
        misassigned < n / 100,
        "{misassigned} of {n} calibrated probs land on the wrong side"
    );
}

#[test]
fn noise_sample_collapses_to_half() {
    let n = 10_000;
    let probs = synthetic_scores(n);
    // labels carry no information about the score
    let labels: Vec<f64> = (0..n).map(|i| (i % 2) as f64).collect();
    let weights = vec![1.0; n];

    let out = calibrate_probs(&labels, &weights, &probs, None, &CalibrationOptions::default())
        .unwrap();

    assert!(out.d2 < 0.02, "pure noise: D2 = {}", out.d2);
    let far_from_half = out
        .probs
        .iter()
        .filter(|&&p| (p - 0.5).abs() > 0.15)
        .count();
    assert!(
        far_from_half < n / 20,
        "{far_from_half} of {n} calibrated probs strayed far from 0.5"
    );
}

#[test]
fn logistic_variant_handles_the_same_flow() {
    let n = 1000;
    let probs = synthetic_scores(n);
    let labels: Vec<f64> = probs.iter().map(|&p| if p > 0.5 { 1.0 } else { -1.0 }).collect();
    let opts = CalibrationOptions {
        method: CalibrationMethod::Logistic,
        ..Default::default()
    };
    let out = calibrate_probs(&labels, &vec![1.0; n], &probs, None, &opts).unwrap();
    assert!(out.probs.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(out.d2 > 0.5, "logistic on separable data: D2 = {}", out.d2);
}

#[test]
fn track_level_calibration_aggregates_to_event_probs() {
    // 300 events, 3 tracks each; every track tags its event correctly with
    // probability 0.7 and the right sign convention
    let n_events = 300u64;
    let mut event_id = Vec::new();
    let mut sign_b = Vec::new();
    let mut sign_track = Vec::new();
    let mut weight = Vec::new();
    let mut probs = Vec::new();
    for e in 0..n_events {
        let sign = if e % 2 == 0 { 1.0 } else { -1.0 };
        for t in 0..3 {
            event_id.push(e);
            sign_b.push(sign);
            // tracks alternate their same-sign flag; probability encodes
            // agreement with the event sign accordingly
            let track_sign = if t == 2 { -1.0 } else { 1.0 };
            sign_track.push(track_sign);
            let p_agree = 0.7;
            probs.push(if sign * track_sign > 0.0 { p_agree } else { 1.0 - p_agree });
            weight.push(1.0);
        }
    }
    let table = TrackTable::new(event_id, sign_b, sign_track, weight).unwrap();

    let agg = aggregate_event_probs(&table, &probs, &AggregateOptions::default()).unwrap();
    assert_eq!(agg.event_id.len(), n_events as usize);
    assert_eq!(agg.untagged, 0);

    // every track agrees with its event, so each event compounds three
    // log-odds terms of the same sign
    for (i, &p) in agg.prob.iter().enumerate() {
        if agg.sign[i] > 0.0 {
            assert!(p > 0.9, "event {i}: p = {p}");
        } else {
            assert!(p < 0.1, "event {i}: p = {p}");
        }
    }

    // event-level AUC with the untagged remainder folded in
    let population = DecayPopulation::with_decays(1000.0);
    let auc = auc_with_untagged(&agg.sign, &agg.prob, &agg.weight, &population).unwrap();
    assert!((auc.tagged - 1.0).abs() < 1e-9);
    assert!(auc.full < auc.tagged && auc.full > 0.5);
}

#[test]
fn bootstrap_on_separable_data_is_stable() {
    let n = 1000;
    let probs = synthetic_scores(n);
    let labels: Vec<f64> = probs.iter().map(|&p| if p > 0.5 { 1.0 } else { 0.0 }).collect();

    let out = bootstrap_calibrate_prob(
        &labels,
        &vec![1.0; n],
        &probs,
        None,
        &BootstrapOptions::default(),
    )
    .unwrap();

    assert_eq!(out.d2.len(), 30);
    let (auc_mean, auc_std) = out.auc_mean_std();
    assert!((auc_mean - 1.0).abs() < 1e-9);
    assert!(auc_std < 1e-9, "no real randomness in classification quality");

    // summarize as if these 1000 unit-weight events came out of a larger
    // population of 2000 decays
    let population = DecayPopulation::with_decays(2000.0);
    let tagged_weight = n as f64;
    let summary = TaggingSummary::from_trials(
        "separable",
        population.tagging_efficiency(tagged_weight),
        population.tagging_efficiency_delta(tagged_weight),
        &out.d2,
        &out.auc,
    );
    assert!(summary.d2 > 0.9);
    assert!((summary.tagging_efficiency - 0.5).abs() < 1e-12);
    assert!(summary.effective_efficiency > 0.45);
    assert!(summary.effective_efficiency_delta > 0.0);
}

#[test]
fn symmetrized_eta_calibration_of_biased_tagger() {
    // a tagger that is overconfident: raw scores stretched toward 0 and 1
    let n = 2000;
    let raw = synthetic_scores(n);
    let labels: Vec<f64> = raw
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            // true probability is milder than the score claims
            let truth = 0.5 + 0.3 * (p - 0.5);
            if ((i * 31) % 1000) as f64 / 1000.0 < truth { 1.0 } else { 0.0 }
        })
        .collect();
    let opts = CalibrationOptions {
        symmetrize: true,
        eta_space: true,
        ..Default::default()
    };
    let out = calibrate_probs(&labels, &vec![1.0; n], &raw, None, &opts).unwrap();

    assert!(out.probs.iter().all(|p| (0.0..=1.0).contains(p)));
    // recalibration strips the overconfidence: D2 drops well below the raw
    // scores' nominal dilution
    let nominal: f64 = raw.iter().map(|&p| (1.0 - 2.0 * p).powi(2)).sum::<f64>() / n as f64;
    assert!(out.d2 < nominal * 0.5, "d2 {} vs nominal {}", out.d2, nominal);
}
