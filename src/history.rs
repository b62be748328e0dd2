//! Transition history tracking.
//!
//! The machine appends a record for every completed transition. History is an
//! immutable value: [`History::record`] returns a new history, leaving the
//! original untouched. The engine keeps history in memory only; serializing
//! it anywhere is the caller's business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event that triggered the transition.
    pub event: String,
    /// The state the machine was in.
    pub from: String,
    /// The state the machine moved to.
    pub to: String,
    /// When the transition completed.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of completed transitions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use gearshift::history::{History, TransitionRecord};
///
/// let history = History::new().record(TransitionRecord {
///     event: "turnOn".into(),
///     from: "Off".into(),
///     to: "On".into(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.records().len(), 1);
/// assert_eq!(history.path(), vec!["Off", "On"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    records: Vec<TransitionRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records, in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The sequence of states traversed: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last record, if any.
    pub fn duration(&self) -> Option<Duration> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }
}
