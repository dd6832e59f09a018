//! Columnar track data.
//!
//! Samples are kept as parallel columns rather than row structs, matching the
//! array-at-a-time shape of the numeric pipeline. `TrackTable` is the slice of
//! the analysis dataset the calibration core actually reads: event ids for
//! grouping, the true B sign, the per-track tag sign, and sWeights.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-track columns for event-keyed data.
///
/// All columns have equal length; row `i` describes one track. Sign columns
/// use the +1/-1 convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackTable {
    /// Event the track belongs to.
    pub event_id: Vec<u64>,
    /// True B-meson sign of the event, repeated on each member track.
    pub sign_b: Vec<f64>,
    /// Tag sign of the track relative to the event hypothesis.
    pub sign_track: Vec<f64>,
    /// sWeight of the event, repeated on each member track.
    pub weight: Vec<f64>,
}

/// Dataset size summary: distinct events and total tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventStatistics {
    pub events: usize,
    pub tracks: usize,
}

impl TrackTable {
    /// Build a table from columns, validating that lengths agree.
    pub fn new(
        event_id: Vec<u64>,
        sign_b: Vec<f64>,
        sign_track: Vec<f64>,
        weight: Vec<f64>,
    ) -> Result<Self> {
        Error::check_same_length(event_id.len(), sign_b.len())?;
        Error::check_same_length(event_id.len(), sign_track.len())?;
        Error::check_same_length(event_id.len(), weight.len())?;
        Ok(Self {
            event_id,
            sign_b,
            sign_track,
            weight,
        })
    }

    /// Number of tracks (rows).
    pub fn len(&self) -> usize {
        self.event_id.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.event_id.is_empty()
    }

    /// Count distinct events and total tracks.
    pub fn event_statistics(&self) -> EventStatistics {
        let seen: HashSet<u64> = self.event_id.iter().copied().collect();
        EventStatistics {
            events: seen.len(),
            tracks: self.len(),
        }
    }

    /// Effective number of events: the per-event mean sWeight, summed.
    ///
    /// Weights are stored per track but are event-level quantities, so the
    /// within-event mean recovers the event weight before summation.
    pub fn weighted_event_count(&self) -> f64 {
        let mut acc: HashMap<u64, (f64, usize)> = HashMap::new();
        for (&id, &w) in self.event_id.iter().zip(&self.weight) {
            let entry = acc.entry(id).or_insert((0.0, 0));
            entry.0 += w;
            entry.1 += 1;
        }
        acc.values().map(|&(sum, n)| sum / n as f64).sum()
    }
}
