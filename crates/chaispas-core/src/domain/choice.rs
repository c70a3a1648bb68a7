//! Choice model and the editable candidate set.

use serde::{Deserialize, Serialize};

use super::errors::ChaispasError;
use super::ids::ChoiceId;

/// One candidate option.
///
/// Identity is `id`; two choices may share the same `text` and are still
/// independently selectable. `number` is an informational tag only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    pub number: i64,
}

impl Choice {
    /// Create a choice from user input. Surrounding whitespace is trimmed and
    /// blank text is rejected.
    pub fn new(id: ChoiceId, text: &str, number: i64) -> Result<Self, ChaispasError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChaispasError::Validation(
                "choice text must not be blank".to_string(),
            ));
        }
        Ok(Self {
            id,
            text: text.to_string(),
            number,
        })
    }
}

/// The candidate set being edited before a decision is made.
///
/// Insertion order is preserved; it is the order the engine draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSet {
    choices: Vec<Choice>,
}

impl ChoiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, choice: Choice) -> &Choice {
        self.choices.push(choice);
        &self.choices[self.choices.len() - 1]
    }

    /// Remove a choice by id. Returns `false` when no such choice exists.
    pub fn remove(&mut self, id: &ChoiceId) -> bool {
        let before = self.choices.len();
        self.choices.retain(|c| &c.id != id);
        self.choices.len() != before
    }

    pub fn reset(&mut self) {
        self.choices.clear();
    }

    pub fn as_slice(&self) -> &[Choice] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
