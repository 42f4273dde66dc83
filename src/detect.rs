// src/detect.rs
//
// Decides whether a freshly fetched price is worth recording.
// Always compare against the last *logged* price (history file),
// never the catalog's cached one.

use crate::config::consts::PRICE_EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChangeEvent {
    /// No prior record: start tracking.
    New,
    Dropped { previous: f64, delta: f64 },
    Increased { previous: f64, delta: f64 },
    Unchanged,
}

impl ChangeEvent {
    /// Should this observation be appended and announced?
    pub fn is_recordable(&self) -> bool {
        !matches!(self, ChangeEvent::Unchanged)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeEvent::New => "new",
            ChangeEvent::Dropped { .. } => "drop",
            ChangeEvent::Increased { .. } => "increase",
            ChangeEvent::Unchanged => "unchanged",
        }
    }
}

/// `delta` is always the absolute magnitude of the move.
pub fn detect(current: f64, last_logged: Option<f64>) -> ChangeEvent {
    let Some(previous) = last_logged else {
        return ChangeEvent::New;
    };
    let diff = current - previous;
    if diff.abs() <= PRICE_EPSILON {
        ChangeEvent::Unchanged
    } else if diff < 0.0 {
        ChangeEvent::Dropped { previous, delta: -diff }
    } else {
        ChangeEvent::Increased { previous, delta: diff }
    }
}
