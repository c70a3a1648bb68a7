//! Export / import of the raw decision log.
//!
//! Format: a JSON array of DecisionRecord, pretty-printed on export.
//! Import accepts exactly that shape: unknown fields, missing fields and
//! non-array payloads are rejected, and every record must pass
//! `DecisionRecord::validate` before anything is handed back.

use crate::domain::{ChaispasError, DecisionLog, DecisionRecord};

/// Serialize the full log, oldest first.
pub fn export(log: &DecisionLog) -> Result<String, ChaispasError> {
    Ok(serde_json::to_string_pretty(log.records())?)
}

/// Parse and validate serialized records.
///
/// Pure: nothing is replaced here, so a failed import can never touch an
/// existing log.
pub fn parse_records(text: &str) -> Result<Vec<DecisionRecord>, ChaispasError> {
    let records: Vec<DecisionRecord> = serde_json::from_str(text)?;
    validate_records(&records)?;
    Ok(records)
}

pub fn validate_records(records: &[DecisionRecord]) -> Result<(), ChaispasError> {
    records.iter().try_for_each(DecisionRecord::validate)
}

/// Parse serialized text into a fresh log with the given cap.
///
/// More than `retention` records keeps the most recent ones.
pub fn import(text: &str, retention: usize) -> Result<DecisionLog, ChaispasError> {
    let records = parse_records(text)?;
    Ok(DecisionLog::from_records(records, retention))
}

/// Replace `log` with the imported records, or leave it untouched on failure.
pub fn import_into(log: &mut DecisionLog, text: &str) -> Result<usize, ChaispasError> {
    let records = parse_records(text)?;
    let dropped = log.replace(records);
    if !dropped.is_empty() {
        tracing::info!(dropped = dropped.len(), "import exceeded retention, kept most recent");
    }
    Ok(log.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ChoiceId, DecisionId};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn record(n: u32, at: DateTime<Utc>) -> DecisionRecord {
        let choices = vec![
            Choice::new(ChoiceId::from_raw(format!("{n}a")), "Pizza", 10).unwrap(),
            Choice::new(ChoiceId::from_raw(format!("{n}b")), "Tacos", 20).unwrap(),
            Choice::new(ChoiceId::from_raw(format!("{n}c")), "Pizza", 30).unwrap(),
        ];
        DecisionRecord::new(
            DecisionId::from_raw(format!("d{n}")),
            at,
            choices.clone(),
            choices[2].clone(),
            u64::from(n) * 1000 + 7,
        )
        .unwrap()
    }

    fn sample_log() -> DecisionLog {
        let mut log = DecisionLog::new();
        // サブ秒の精度まで round-trip できること
        log.append(record(1, Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap()));
        log.append(record(2, Utc.timestamp_opt(1_700_000_500, 0).unwrap()));
        log
    }

    #[test]
    fn export_then_import_is_lossless() {
        let log = sample_log();
        let text = export(&log).unwrap();
        let back = import(&text, log.retention()).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn export_is_indented_array() {
        let text = export(&sample_log()).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"selectedChoice\""));
        assert!(text.contains("\"decisionTime\": 1007"));
    }

    #[test]
    fn export_of_empty_log_is_empty_array() {
        let text = export(&DecisionLog::new()).unwrap();
        assert_eq!(text, "[]");
        assert!(import(&text, 100).unwrap().is_empty());
    }

    #[test]
    fn accepts_millisecond_iso_timestamps() {
        // ブラウザの JSON.stringify(Date) 形式
        let text = r#"[{
            "id": "1712345678901",
            "timestamp": "2024-04-05T19:34:38.901Z",
            "choices": [
                {"id": "1", "text": "Pizza", "number": 12},
                {"id": "2", "text": "Sushi", "number": 999}
            ],
            "selectedChoice": {"id": "2", "text": "Sushi", "number": 999},
            "decisionTime": 3004
        }]"#;
        let log = import(text, 100).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].timestamp.timestamp_millis(), 1_712_345_678_901);
    }

    #[rstest]
    #[case::not_json("definitely not json")]
    #[case::object_not_array(r#"{"id": "d1"}"#)]
    #[case::array_of_numbers("[1, 2, 3]")]
    #[case::missing_field(
        r#"[{"id":"d1","timestamp":"2024-01-01T00:00:00Z","choices":[],"decisionTime":1}]"#
    )]
    #[case::unknown_field(
        r#"[{"id":"d1","timestamp":"2024-01-01T00:00:00Z",
            "choices":[{"id":"a","text":"A","number":1},{"id":"b","text":"B","number":2}],
            "selectedChoice":{"id":"a","text":"A","number":1},
            "decisionTime":1,"userId":"u1"}]"#
    )]
    #[case::negative_time(
        r#"[{"id":"d1","timestamp":"2024-01-01T00:00:00Z",
            "choices":[{"id":"a","text":"A","number":1},{"id":"b","text":"B","number":2}],
            "selectedChoice":{"id":"a","text":"A","number":1},
            "decisionTime":-5}]"#
    )]
    fn malformed_payload_is_parse_error(#[case] text: &str) {
        let err = import(text, 100).unwrap_err();
        assert!(matches!(err, ChaispasError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn foreign_selected_choice_is_integrity_error() {
        let text = r#"[{"id":"d1","timestamp":"2024-01-01T00:00:00Z",
            "choices":[{"id":"a","text":"A","number":1},{"id":"b","text":"B","number":2}],
            "selectedChoice":{"id":"zzz","text":"A","number":1},
            "decisionTime":1}]"#;
        let err = import(text, 100).unwrap_err();
        assert!(matches!(err, ChaispasError::Integrity(_)));
    }

    #[test]
    fn failed_import_leaves_log_untouched() {
        let mut log = sample_log();
        let before = log.clone();

        assert!(import_into(&mut log, "[{\"nope\": true}]").is_err());
        assert_eq!(log, before);
    }

    #[test]
    fn import_into_replaces_wholesale() {
        let mut log = sample_log();
        let mut other = DecisionLog::new();
        other.append(record(9, Utc.timestamp_opt(1_800_000_000, 0).unwrap()));

        let kept = import_into(&mut log, &export(&other).unwrap()).unwrap();

        assert_eq!(kept, 1);
        assert_eq!(log, other);
    }

    #[test]
    fn import_over_retention_keeps_most_recent() {
        let mut big = DecisionLog::with_retention(500);
        for n in 0..150 {
            big.append(record(n, Utc.timestamp_opt(1_700_000_000 + i64::from(n), 0).unwrap()));
        }
        let log = import(&export(&big).unwrap(), 100).unwrap();
        assert_eq!(log.len(), 100);
        assert_eq!(log.records()[0].id.as_str(), "d50");
        assert_eq!(log.latest().unwrap().id.as_str(), "d149");
    }
}
