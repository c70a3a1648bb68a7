//! Rendering of records and summaries for the terminal.

use std::fmt::Write as _;

use chaispas_core::{AnalyticsSummary, DecisionRecord};

pub fn decision_text(record: &DecisionRecord) -> String {
    format!(
        "{}  (from {} choices, {} ms)",
        record.selected_choice.text,
        record.choices.len(),
        record.decision_time
    )
}

pub fn summary_text(summary: &AnalyticsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total decisions:        {}", summary.total_decisions);
    let _ = writeln!(out, "Total choices:          {}", summary.total_choices);
    let _ = writeln!(
        out,
        "Avg choices / decision: {:.2}",
        summary.average_choices_per_decision
    );
    let _ = writeln!(out, "Avg decision time:      {} ms", summary.average_decision_time);

    if !summary.most_common_choices.is_empty() {
        let _ = writeln!(out, "\nMost common choices:");
        for (rank, entry) in summary.most_common_choices.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {} ({})", rank + 1, entry.text, entry.count);
        }
    }
    out
}

pub fn history_text(records: &[&DecisionRecord]) -> String {
    if records.is_empty() {
        return "No decisions yet.\n".to_string();
    }
    let mut out = String::new();
    for record in records {
        let candidates: Vec<&str> = record.choices.iter().map(|c| c.text.as_str()).collect();
        let _ = writeln!(
            out,
            "{}  {}  <- [{}]",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.selected_choice.text,
            candidates.join(", ")
        );
    }
    out
}
