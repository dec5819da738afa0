//! Quiz attempt scoring
//!
//! An entry is correct only when the selected answer ids equal the
//! question's answer key as a set. Subsets and supersets score nothing.

use crate::domain::{round2, NewUserQuizAnswer, SubmitAnswerInput};
use chrono::{DateTime, Utc};

/// Exact set match between the answer key and the selection
pub fn is_exact_match(answer_key: &[i64], selected: &[i64]) -> bool {
    let mut key = answer_key.to_vec();
    let mut chosen = selected.to_vec();
    key.sort_unstable();
    chosen.sort_unstable();
    key == chosen
}

/// Rows recorded for one submitted entry.
///
/// Each selected id gets a row carrying the entry's verdict; an empty
/// selection is recorded as one skipped row with no answer id.
pub fn answer_rows(
    entry: &SubmitAnswerInput,
    is_correct: bool,
    now: DateTime<Utc>,
) -> Vec<NewUserQuizAnswer> {
    let answered_at = entry.answered_at.unwrap_or(now);

    if entry.selected_answer_ids.is_empty() {
        return vec![NewUserQuizAnswer {
            question_id: entry.question_id,
            answer_id: None,
            is_correct: false,
            answered_at,
        }];
    }

    entry
        .selected_answer_ids
        .iter()
        .map(|&answer_id| NewUserQuizAnswer {
            question_id: entry.question_id,
            answer_id: Some(answer_id),
            is_correct,
            answered_at,
        })
        .collect()
}

/// Percentage of correct entries, rounded to two decimals
pub fn score(total_correct: i64, total_questions: i64) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    round2(100.0 * total_correct as f64 / total_questions as f64)
}

/// Metric label for a finished attempt
pub fn outcome(total_correct: i64, total_questions: i64) -> &'static str {
    if total_correct == 0 {
        "zero"
    } else if total_correct == total_questions {
        "perfect"
    } else {
        "partial"
    }
}
