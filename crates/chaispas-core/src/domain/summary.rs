//! Analytics summary view.
//!
//! Derived from a DecisionLog on demand and never stored. Serializes with the
//! same camelCase names the analytics endpoint used (`totalDecisions`, ...).

use serde::{Deserialize, Serialize};

use super::record::DecisionRecord;

/// How often a choice text appeared across all candidate sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceCount {
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_decisions: usize,
    pub total_choices: usize,
    /// Rounded to 2 decimal places.
    pub average_choices_per_decision: f64,
    /// Rounded to the nearest millisecond.
    pub average_decision_time: u64,
    pub most_common_choices: Vec<ChoiceCount>,
    /// Newest first.
    pub recent_decisions: Vec<DecisionRecord>,
    /// Oldest first (timeline order).
    pub decision_history: Vec<DecisionRecord>,
}

impl AnalyticsSummary {
    pub fn empty() -> Self {
        Self {
            total_decisions: 0,
            total_choices: 0,
            average_choices_per_decision: 0.0,
            average_decision_time: 0,
            most_common_choices: Vec::new(),
            recent_decisions: Vec::new(),
            decision_history: Vec::new(),
        }
    }
}
