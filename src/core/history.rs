//! History of committed state changes.
//!
//! Only changes that fully committed (the event sink accepted them) are
//! recorded; a rolled-back change never appears here.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::ChangeRecord;
/// use chrono::Utc;
///
/// let record = ChangeRecord {
///     from: "draft".to_string(),
///     to: "published".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "published");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ChangeRecord<S: State> {
    /// The state before the change
    pub from: S,
    /// The state after the change
    pub to: S,
    /// When the change committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed changes.
///
/// `record` returns a new history and leaves `self` untouched.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{ChangeRecord, StateHistory};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(ChangeRecord {
///     from: "a".to_string(),
///     to: "b".to_string(),
///     timestamp: Utc::now(),
/// });
/// let history = history.record(ChangeRecord {
///     from: "b".to_string(),
///     to: "c".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // a -> b -> c
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    records: Vec<ChangeRecord<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    pub fn record(&self, record: ChangeRecord<S>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Keep only the most recent `limit` records, returning a new history.
    pub fn retain_last(&self, limit: usize) -> Self {
        let skip = self.records.len().saturating_sub(limit);
        Self {
            records: self.records[skip..].to_vec(),
        }
    }

    /// States traversed: the first record's `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Time between the first and last recorded change.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&ChangeRecord<S>> {
        self.records.last()
    }

    /// All records in commit order.
    pub fn transitions(&self) -> &[ChangeRecord<S>] {
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

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Phase {
        One,
        Two,
        Three,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::One => "One",
                Self::Two => "Two",
                Self::Three => "Three",
            }
        }
    }

    fn record(from: Phase, to: Phase) -> ChangeRecord<Phase> {
        ChangeRecord {
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Phase> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let updated = history.record(record(Phase::One, Phase::Two));

        assert_eq!(history.len(), 0);
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(record(Phase::One, Phase::Two))
            .record(record(Phase::Two, Phase::Three));

        assert_eq!(
            history.get_path(),
            vec![&Phase::One, &Phase::Two, &Phase::Three]
        );
        assert_eq!(history.last().map(|r| &r.to), Some(&Phase::Three));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(ChangeRecord {
                from: Phase::One,
                to: Phase::Two,
                timestamp: start,
            })
            .record(ChangeRecord {
                from: Phase::Two,
                to: Phase::Three,
                timestamp: start + chrono::Duration::seconds(3),
            });

        assert_eq!(history.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn retain_last_drops_oldest_records() {
        let history = StateHistory::new()
            .record(record(Phase::One, Phase::Two))
            .record(record(Phase::Two, Phase::Three))
            .record(record(Phase::Three, Phase::One));

        let trimmed = history.retain_last(2);
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.transitions()[0].from, Phase::Two);
        assert_eq!(history.retain_last(10).len(), 3);
        assert!(history.retain_last(0).is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(record(Phase::One, Phase::Two));

        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory<Phase> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.transitions()[0].to, Phase::Two);
    }
}
