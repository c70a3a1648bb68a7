//! Decision submission - サーバー側で受け取る決定の検証と採番
//!
//! クライアントは ID を持たない `{choices, selectedChoice, decisionTime}` を送る。
//! selectedChoice は text と number の一致で候補に紐付け、ID はこちらで振る。

use serde::{Deserialize, Serialize};

use crate::domain::{ChaispasError, Choice, DecisionRecord, MIN_CHOICES};
use crate::ports::{Clock, IdGenerator};

/// ID なしの候補
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedChoice {
    pub text: String,
    pub number: i64,
}

/// 受信ペイロード
///
/// フィールド欠落は Parse ではなく Validation として返したいので Option で受ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSubmission {
    #[serde(default)]
    pub choices: Option<Vec<SubmittedChoice>>,
    #[serde(default)]
    pub selected_choice: Option<SubmittedChoice>,
    #[serde(default)]
    pub decision_time: Option<u64>,
}

impl DecisionSubmission {
    pub fn from_json(text: &str) -> Result<Self, ChaispasError> {
        Ok(serde_json::from_str(text)?)
    }

    /// 検証して DecisionRecord を組み立てる（まだどこにも書き込まない）
    ///
    /// # エラー
    /// - フィールド欠落 / 候補 2 未満 / 空文字 → Validation
    /// - selectedChoice がどの候補とも一致しない → Integrity
    pub fn resolve(
        self,
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
    ) -> Result<DecisionRecord, ChaispasError> {
        let (Some(submitted), Some(selected), Some(decision_time)) =
            (self.choices, self.selected_choice, self.decision_time)
        else {
            return Err(ChaispasError::Validation(
                "missing required fields: choices, selectedChoice, decisionTime".to_string(),
            ));
        };

        if submitted.len() < MIN_CHOICES {
            return Err(ChaispasError::Validation(format!(
                "at least {MIN_CHOICES} choices are required, got {}",
                submitted.len()
            )));
        }

        let choices = submitted
            .iter()
            .map(|c| Choice::new(ids.choice_id(), &c.text, c.number))
            .collect::<Result<Vec<_>, _>>()?;

        // 同じ text+number が複数あれば先頭に紐付ける
        let winner = submitted
            .iter()
            .position(|c| c.text == selected.text && c.number == selected.number)
            .map(|i| choices[i].clone())
            .ok_or_else(|| {
                ChaispasError::Integrity(format!(
                    "selected choice {:?} (#{}) is not among the submitted choices",
                    selected.text, selected.number
                ))
            })?;

        DecisionRecord::new(ids.decision_id(), clock.now(), choices, winner, decision_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock, UlidGenerator};
    use chrono::{TimeZone, Utc};

    fn submitted(text: &str, number: i64) -> SubmittedChoice {
        SubmittedChoice {
            text: text.to_string(),
            number,
        }
    }

    fn submission(choices: Vec<SubmittedChoice>, selected: SubmittedChoice) -> DecisionSubmission {
        DecisionSubmission {
            choices: Some(choices),
            selected_choice: Some(selected),
            decision_time: Some(3000),
        }
    }

    #[test]
    fn resolves_winner_by_text_and_number() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(at);
        let ids = UlidGenerator::new(clock);

        let record = submission(
            vec![submitted("Pizza", 1), submitted("Pizza", 2), submitted("Tacos", 3)],
            submitted("Pizza", 2),
        )
        .resolve(&ids, &clock)
        .unwrap();

        assert_eq!(record.timestamp, at);
        assert_eq!(record.decision_time, 3000);
        assert_eq!(record.selected_choice, record.choices[1]);
        assert!(record.id.as_str().starts_with("decision-"));
        assert!(record.choices.iter().all(|c| c.id.as_str().starts_with("choice-")));
    }

    #[test]
    fn text_match_with_wrong_number_is_integrity_error() {
        let ids = UlidGenerator::new(SystemClock);
        let err = submission(
            vec![submitted("Pizza", 1), submitted("Tacos", 3)],
            submitted("Pizza", 99),
        )
        .resolve(&ids, &SystemClock)
        .unwrap_err();
        assert!(matches!(err, ChaispasError::Integrity(_)));
    }

    #[test]
    fn missing_fields_are_validation_errors() {
        let ids = UlidGenerator::new(SystemClock);
        let parsed = DecisionSubmission::from_json(r#"{"choices": []}"#).unwrap();
        let err = parsed.resolve(&ids, &SystemClock).unwrap_err();
        assert!(matches!(err, ChaispasError::Validation(_)));
    }

    #[test]
    fn zero_decision_time_is_accepted() {
        let ids = UlidGenerator::new(SystemClock);
        let mut s = submission(vec![submitted("A", 1), submitted("B", 2)], submitted("B", 2));
        s.decision_time = Some(0);
        assert_eq!(s.resolve(&ids, &SystemClock).unwrap().decision_time, 0);
    }

    #[test]
    fn too_few_choices_is_validation_error() {
        let ids = UlidGenerator::new(SystemClock);
        let err = submission(vec![submitted("A", 1)], submitted("A", 1))
            .resolve(&ids, &SystemClock)
            .unwrap_err();
        assert!(matches!(err, ChaispasError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = DecisionSubmission::from_json("{choices:").unwrap_err();
        assert!(matches!(err, ChaispasError::Parse(_)));
    }

    #[test]
    fn parses_camel_case_payload() {
        let s = DecisionSubmission::from_json(
            r#"{"choices":[{"text":"A","number":1},{"text":"B","number":2}],
                "selectedChoice":{"text":"A","number":1},"decisionTime":42}"#,
        )
        .unwrap();
        assert_eq!(s.decision_time, Some(42));
        assert_eq!(s.selected_choice, Some(submitted("A", 1)));
    }
}
