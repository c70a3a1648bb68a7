//! Most-common-choices ranking.

use std::collections::HashMap;

use crate::domain::{ChoiceCount, DecisionRecord};

/// Count every choice text across all candidate sets and return the top
/// `limit`, highest count first.
///
/// Grouping is by exact string (case-sensitive). Ties keep first-seen order:
/// counts are accumulated in a Vec indexed through a HashMap, then sorted
/// with a stable sort.
pub fn most_common_choices(records: &[DecisionRecord], limit: usize) -> Vec<ChoiceCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ChoiceCount> = Vec::new();

    for choice in records.iter().flat_map(|r| r.choices.iter()) {
        match slots.get(choice.text.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(choice.text.as_str(), counts.len());
                counts.push(ChoiceCount {
                    text: choice.text.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
