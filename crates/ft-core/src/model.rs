//! Classifier collaborator boundary.
//!
//! The tagger itself (training, features, prediction) lives outside this
//! crate; the calibration core only ever consumes the signal-class
//! probability column, so that is the whole interface.

use ft_common::{Result, TrackTable};

/// A trained classifier able to score track tables.
pub trait SignalProbModel {
    /// Per-track probability of the signal class, aligned to the table rows.
    fn predict_signal_prob(&self, table: &TrackTable) -> Result<Vec<f64>>;
}

/// Score several tables and pool them into one dataset.
///
/// Each table is predicted separately (fold-aware models assign folds per
/// table, so pooling before prediction would leak), then rows and
/// probabilities are concatenated in input order.
pub fn pooled_predictions<M>(model: &M, tables: &[&TrackTable]) -> Result<(TrackTable, Vec<f64>)>
where
    M: SignalProbModel + ?Sized,
{
    let mut event_id = Vec::new();
    let mut sign_b = Vec::new();
    let mut sign_track = Vec::new();
    let mut weight = Vec::new();
    let mut probs = Vec::new();

    for table in tables {
        let p = model.predict_signal_prob(table)?;
        probs.extend(p);
        event_id.extend_from_slice(&table.event_id);
        sign_b.extend_from_slice(&table.sign_b);
        sign_track.extend_from_slice(&table.sign_track);
        weight.extend_from_slice(&table.weight);
    }

    let pooled = TrackTable::new(event_id, sign_b, sign_track, weight)?;
    Ok((pooled, probs))
}
