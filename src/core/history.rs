//! Per-batch transition history.
//!
//! Every committed transition appends one immutable record naming the caller
//! that performed it. Rejected transitions leave no trace.

use super::batch::Identity;
use super::state::BatchStage;
use super::transition::TransitionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// Temperature updates keep the stage, so `from == to` for them.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Which transition was applied
    pub kind: TransitionKind,
    /// Stage before the transition
    pub from: BatchStage,
    /// Stage after the transition
    pub to: BatchStage,
    /// Caller that invoked the transition
    pub actor: Identity,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only history of one batch.
///
/// `record` returns a new history with the entry appended, leaving the
/// original untouched.
///
/// # Example
///
/// ```rust
/// use harvest_ledger::core::{BatchHistory, BatchStage, Identity, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let history = BatchHistory::new().record(TransitionRecord {
///     kind: TransitionKind::Approve,
///     from: BatchStage::Created,
///     to: BatchStage::Approved,
///     actor: Identity::new("0xmanager"),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.stage_path(), vec![BatchStage::Created, BatchStage::Approved]);
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BatchHistory {
    records: Vec<TransitionRecord>,
}

impl BatchHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Get the distinct stages traversed, starting from the first `from`.
    ///
    /// Stage-preserving entries (temperature updates) do not repeat a stage.
    pub fn stage_path(&self) -> Vec<BatchStage> {
        let mut path: Vec<BatchStage> = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            if path.last() != Some(&record.to) {
                path.push(record.to);
            }
        }
        path
    }

    /// Calculate total duration from first to last record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Records performed by one caller, in order.
    pub fn by_actor<'a>(&'a self, actor: &'a Identity) -> impl Iterator<Item = &'a TransitionRecord> {
        self.records.iter().filter(move |r| &r.actor == actor)
    }

    /// Get all records in commit order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: TransitionKind, from: BatchStage, to: BatchStage, actor: &str) -> TransitionRecord {
        TransitionRecord {
            kind,
            from,
            to,
            actor: Identity::new(actor),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = BatchHistory::new();
        assert!(history.is_empty());
        assert!(history.stage_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = BatchHistory::new();

        let new_history = history.record(entry(
            TransitionKind::Approve,
            BatchStage::Created,
            BatchStage::Approved,
            "0xm",
        ));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn stage_path_skips_temperature_updates() {
        let history = BatchHistory::new()
            .record(entry(
                TransitionKind::UpdateTemperature,
                BatchStage::Created,
                BatchStage::Created,
                "0xf",
            ))
            .record(entry(
                TransitionKind::Approve,
                BatchStage::Created,
                BatchStage::Approved,
                "0xm",
            ))
            .record(entry(
                TransitionKind::UpdateTemperature,
                BatchStage::Approved,
                BatchStage::Approved,
                "0xm",
            ))
            .record(entry(
                TransitionKind::Pick,
                BatchStage::Approved,
                BatchStage::Picked,
                "0xt",
            ));

        assert_eq!(
            history.stage_path(),
            vec![BatchStage::Created, BatchStage::Approved, BatchStage::Picked]
        );
    }

    #[test]
    fn by_actor_filters_records() {
        let manager = Identity::new("0xm");
        let history = BatchHistory::new()
            .record(entry(
                TransitionKind::Approve,
                BatchStage::Created,
                BatchStage::Approved,
                "0xm",
            ))
            .record(entry(
                TransitionKind::Pick,
                BatchStage::Approved,
                BatchStage::Picked,
                "0xt",
            ));

        let kinds: Vec<_> = history.by_actor(&manager).map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TransitionKind::Approve]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let mut first = entry(
            TransitionKind::Approve,
            BatchStage::Created,
            BatchStage::Approved,
            "0xm",
        );
        first.timestamp = start;
        let mut second = entry(
            TransitionKind::Pick,
            BatchStage::Approved,
            BatchStage::Picked,
            "0xt",
        );
        second.timestamp = start + chrono::Duration::milliseconds(25);

        let history = BatchHistory::new().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = BatchHistory::new().record(entry(
            TransitionKind::Receive,
            BatchStage::Picked,
            BatchStage::Received,
            "0xd",
        ));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: BatchHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
