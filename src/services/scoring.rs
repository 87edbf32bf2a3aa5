use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::db::models::AnswerOption;
use crate::schemas::test::AnswerSubmission;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScoringError {
    #[error("test has no questions")]
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreOutcome {
    pub(crate) correct: usize,
    pub(crate) total: usize,
    pub(crate) score: f64,
}

/// Option id to (owning question, correctness) for every option of one test.
pub(crate) struct AnswerKey {
    options: HashMap<i64, (i64, bool)>,
}

impl AnswerKey {
    pub(crate) fn from_options(options: &[AnswerOption]) -> Self {
        Self {
            options: options
                .iter()
                .map(|option| (option.id, (option.question_id, option.is_correct)))
                .collect(),
        }
    }

    fn credits(&self, answer: &AnswerSubmission) -> bool {
        matches!(
            self.options.get(&answer.selected_option_id),
            Some(&(question_id, true)) if question_id == answer.question_id
        )
    }
}

/// Scores a submission against the key. Only the first answer given for a question is
/// considered, and an option only earns credit for the question that owns it.
pub(crate) fn score_submission(
    key: &AnswerKey,
    total_questions: usize,
    max_score: i32,
    answers: &[AnswerSubmission],
) -> Result<ScoreOutcome, ScoringError> {
    if total_questions == 0 {
        return Err(ScoringError::NoQuestions);
    }

    let mut answered = HashSet::new();
    let correct = answers
        .iter()
        .filter(|answer| answered.insert(answer.question_id))
        .filter(|answer| key.credits(answer))
        .count();

    let ratio = correct as f64 / total_questions as f64;
    Ok(ScoreOutcome { correct, total: total_questions, score: round2(ratio * max_score as f64) })
}

/// Two-decimal rounding of the exact binary value, so exact halves go to the even digit.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
