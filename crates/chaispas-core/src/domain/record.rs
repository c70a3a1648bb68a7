//! Decision record: one finished decision as stored in the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::choice::Choice;
use super::errors::ChaispasError;
use super::ids::DecisionId;

/// Minimum number of candidates a recorded decision must have.
pub const MIN_CHOICES: usize = 2;

/// A decision made from a candidate set.
///
/// Records:
/// - the full candidate set at decision time
/// - which choice won
/// - how long it took from request to reveal
///
/// Field names follow the serialized log format (`selectedChoice`,
/// `decisionTime`); unknown fields are rejected on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DecisionRecord {
    pub id: DecisionId,
    pub timestamp: DateTime<Utc>,
    pub choices: Vec<Choice>,
    pub selected_choice: Choice,
    /// Elapsed milliseconds from request to reveal.
    pub decision_time: u64,
}

impl DecisionRecord {
    /// Create a record, rejecting it if it breaks a log invariant.
    pub fn new(
        id: DecisionId,
        timestamp: DateTime<Utc>,
        choices: Vec<Choice>,
        selected_choice: Choice,
        decision_time: u64,
    ) -> Result<Self, ChaispasError> {
        let record = Self {
            id,
            timestamp,
            choices,
            selected_choice,
            decision_time,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants every stored record must hold.
    ///
    /// - at least [`MIN_CHOICES`] candidates
    /// - `selected_choice.id` is one of `choices`
    pub fn validate(&self) -> Result<(), ChaispasError> {
        if self.choices.len() < MIN_CHOICES {
            return Err(ChaispasError::Validation(format!(
                "decision {} has {} choice(s), at least {} required",
                self.id,
                self.choices.len(),
                MIN_CHOICES
            )));
        }
        if !self
            .choices
            .iter()
            .any(|c| c.id == self.selected_choice.id)
        {
            return Err(ChaispasError::Integrity(format!(
                "decision {}: selected choice {} is not among its choices",
                self.id, self.selected_choice.id
            )));
        }
        Ok(())
    }
}
