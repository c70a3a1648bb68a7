//! Analytics aggregator: folds the decision log into summary statistics.
//!
//! Everything here is a pure function of the log contents. The log itself is
//! owned by the caller (see `DecisionLog` for append / clear / retention and
//! `codec` for export / import).

pub mod codec;
pub mod ranking;

use serde::{Deserialize, Serialize};

use crate::domain::{AnalyticsSummary, DecisionLog, DecisionRecord, DEFAULT_RETENTION};

pub use codec::{export, import, import_into};
pub use ranking::most_common_choices;

/// Sizes of the slices a summary exposes, plus the log cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsLimits {
    /// Maximum number of records kept in the log.
    pub retention: usize,
    /// Length of `mostCommonChoices`.
    pub top_choices: usize,
    /// Length of `recentDecisions`.
    pub recent: usize,
    /// Length of the newest-first timeline view.
    pub timeline: usize,
}

impl Default for AnalyticsLimits {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            top_choices: 10,
            recent: 10,
            timeline: 7,
        }
    }
}

/// Summarize with the default limits.
pub fn summarize(log: &DecisionLog) -> AnalyticsSummary {
    summarize_with(log, &AnalyticsLimits::default())
}

pub fn summarize_with(log: &DecisionLog, limits: &AnalyticsLimits) -> AnalyticsSummary {
    let records = log.records();
    if records.is_empty() {
        return AnalyticsSummary::empty();
    }

    let total_decisions = records.len();
    let total_choices: usize = records.iter().map(|r| r.choices.len()).sum();
    let total_time: u128 = records.iter().map(|r| u128::from(r.decision_time)).sum();

    let average_choices = total_choices as f64 / total_decisions as f64;
    let average_time = total_time as f64 / total_decisions as f64;

    AnalyticsSummary {
        total_decisions,
        total_choices,
        average_choices_per_decision: round_to_hundredths(average_choices),
        average_decision_time: average_time.round() as u64,
        most_common_choices: most_common_choices(records, limits.top_choices),
        recent_decisions: newest_first(records, limits.recent).cloned().collect(),
        decision_history: records.to_vec(),
    }
}

/// The last `limit` records, newest first.
pub fn timeline(log: &DecisionLog, limit: usize) -> Vec<&DecisionRecord> {
    newest_first(log.records(), limit).collect()
}

fn newest_first(
    records: &[DecisionRecord],
    limit: usize,
) -> impl Iterator<Item = &DecisionRecord> {
    records.iter().rev().take(limit)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
