//! Decision log: bounded, append-only history of decisions.
//!
//! Design:
//! - This is the single source of truth for analytics.
//! - Oldest-first order; FIFO eviction keeps the most recent `retention` records.
//! - Mutated only by `append`, `clear` and `replace` (import).

use super::record::DecisionRecord;

/// Default retention cap.
pub const DEFAULT_RETENTION: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionLog {
    records: Vec<DecisionRecord>,
    retention: usize,
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log with a custom cap. A cap of 0 is treated as 1.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            records: Vec::new(),
            retention: retention.max(1),
        }
    }

    /// Build a log from oldest-first records, keeping only the most recent
    /// `retention` of them.
    pub fn from_records(records: Vec<DecisionRecord>, retention: usize) -> Self {
        let mut log = Self::with_retention(retention);
        log.records = records;
        log.evict_overflow();
        log
    }

    /// Append one record, then drop the oldest records until the cap holds.
    ///
    /// Returns the evicted records (oldest first).
    pub fn append(&mut self, record: DecisionRecord) -> Vec<DecisionRecord> {
        self.records.push(record);
        self.evict_overflow()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Wholesale overwrite with already-validated records (import).
    pub fn replace(&mut self, records: Vec<DecisionRecord>) -> Vec<DecisionRecord> {
        self.records = records;
        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> Vec<DecisionRecord> {
        let overflow = self.records.len().saturating_sub(self.retention);
        self.records.drain(..overflow).collect()
    }

    /// Oldest-first view.
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DecisionRecord> {
        self.records
    }

    pub fn latest(&self) -> Option<&DecisionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ChoiceId, DecisionId};
    use chrono::{TimeZone, Utc};

    fn record(n: usize) -> DecisionRecord {
        let choices = vec![
            Choice::new(ChoiceId::from_raw(format!("{n}-a")), "A", 1).unwrap(),
            Choice::new(ChoiceId::from_raw(format!("{n}-b")), "B", 2).unwrap(),
        ];
        DecisionRecord::new(
            DecisionId::from_raw(format!("d{n}")),
            Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
            choices.clone(),
            choices[0].clone(),
            n as u64,
        )
        .unwrap()
    }

    fn ids(log: &DecisionLog) -> Vec<String> {
        log.records().iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn append_below_cap_keeps_everything() {
        let mut log = DecisionLog::new();
        for n in 0..5 {
            assert!(log.append(record(n)).is_empty());
        }
        assert_eq!(ids(&log), vec!["d0", "d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn append_to_full_log_drops_exactly_the_oldest() {
        let mut log = DecisionLog::new();
        for n in 0..DEFAULT_RETENTION {
            log.append(record(n));
        }
        assert_eq!(log.len(), 100);

        let evicted = log.append(record(100));

        assert_eq!(log.len(), 100);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id.as_str(), "d0");
        assert_eq!(log.records()[0].id.as_str(), "d1");
        assert_eq!(log.latest().unwrap().id.as_str(), "d100");

        // 残りは 1 つずつずれただけ
        for (i, r) in log.records().iter().enumerate() {
            assert_eq!(r.id.as_str(), format!("d{}", i + 1));
        }
    }

    #[test]
    fn length_never_exceeds_cap() {
        let mut log = DecisionLog::with_retention(3);
        for n in 0..50 {
            log.append(record(n));
            assert!(log.len() <= 3);
        }
        assert_eq!(ids(&log), vec!["d47", "d48", "d49"]);
    }

    #[test]
    fn from_records_keeps_most_recent() {
        let records: Vec<_> = (0..120).map(record).collect();
        let log = DecisionLog::from_records(records, DEFAULT_RETENTION);
        assert_eq!(log.len(), 100);
        assert_eq!(log.records()[0].id.as_str(), "d20");
    }

    #[test]
    fn zero_retention_is_clamped() {
        let mut log = DecisionLog::with_retention(0);
        log.append(record(1));
        assert_eq!(log.len(), 1);
        assert_eq!(log.retention(), 1);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = DecisionLog::new();
        log.append(record(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
