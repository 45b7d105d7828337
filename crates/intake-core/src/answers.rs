//! Strict answer-shape validation.
//!
//! The scoring engine is total and silently scores garbage as 0. Callers
//! that want malformed submissions rejected instead run this validation
//! before scoring. The CLI does so under `--strict`.

use thiserror::Error;

use crate::model::{AnswerSet, AnswerValue, Questionnaire, QuestionKind};

/// A single problem found in a submission's answers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerError {
    /// The answer references a question id the questionnaire does not have.
    #[error("answer for unknown question '{question_id}'")]
    UnknownQuestion { question_id: String },

    /// The answer value has the wrong shape for the question type.
    #[error("question '{question_id}' ({kind}) expects {expected}")]
    TypeMismatch {
        question_id: String,
        kind: String,
        expected: &'static str,
    },

    /// A selected option is not in the question's option list.
    #[error("question '{question_id}': option '{option}' is not offered")]
    UnknownOption { question_id: String, option: String },

    /// A scale answer did not parse as a number.
    #[error("question '{question_id}': scale answer '{value}' is not numeric")]
    NotNumeric { question_id: String, value: String },

    /// A scale answer parsed but is outside the inclusive 0-10 range.
    #[error("question '{question_id}': scale answer {value} is outside 0-10")]
    ScaleOutOfRange { question_id: String, value: f64 },

    /// A required question has no answer.
    #[error("required question '{question_id}' is unanswered")]
    MissingRequired { question_id: String },
}

/// Validate a full answer set against a questionnaire.
///
/// Collects every problem rather than stopping at the first, so a form
/// round-trip can surface all of them at once.
pub fn validate_answers(
    questionnaire: &Questionnaire,
    answers: &AnswerSet,
) -> Result<(), Vec<AnswerError>> {
    let mut errors = Vec::new();

    for (question_id, value) in answers {
        let Some(question) = questionnaire.question(question_id) else {
            errors.push(AnswerError::UnknownQuestion {
                question_id: question_id.clone(),
            });
            continue;
        };

        match &question.kind {
            QuestionKind::ShortText | QuestionKind::LongText => {
                if value.as_text().is_none() {
                    errors.push(AnswerError::TypeMismatch {
                        question_id: question_id.clone(),
                        kind: question.kind.to_string(),
                        expected: "a text answer",
                    });
                }
            }

            QuestionKind::SingleSelect { options, .. } => match value.as_text() {
                Some(option) => {
                    if !options.iter().any(|o| o == option) {
                        errors.push(AnswerError::UnknownOption {
                            question_id: question_id.clone(),
                            option: option.to_string(),
                        });
                    }
                }
                None => errors.push(AnswerError::TypeMismatch {
                    question_id: question_id.clone(),
                    kind: question.kind.to_string(),
                    expected: "a single option string",
                }),
            },

            QuestionKind::MultiSelect { options, .. } => match value.as_selections() {
                Some(selected) => {
                    for option in selected {
                        if !options.iter().any(|o| o == option) {
                            errors.push(AnswerError::UnknownOption {
                                question_id: question_id.clone(),
                                option: option.clone(),
                            });
                        }
                    }
                }
                None => errors.push(AnswerError::TypeMismatch {
                    question_id: question_id.clone(),
                    kind: question.kind.to_string(),
                    expected: "a list of option strings",
                }),
            },

            QuestionKind::Scale => match value.as_text() {
                Some(raw) => match raw.trim().parse::<f64>() {
                    Ok(rating) if rating.is_finite() && (0.0..=10.0).contains(&rating) => {}
                    Ok(rating) => errors.push(AnswerError::ScaleOutOfRange {
                        question_id: question_id.clone(),
                        value: rating,
                    }),
                    Err(_) => errors.push(AnswerError::NotNumeric {
                        question_id: question_id.clone(),
                        value: raw.to_string(),
                    }),
                },
                None => errors.push(AnswerError::TypeMismatch {
                    question_id: question_id.clone(),
                    kind: question.kind.to_string(),
                    expected: "a numeric string",
                }),
            },
        }
    }

    for question in &questionnaire.questions {
        if question.required && !answers.contains_key(&question.id) {
            errors.push(AnswerError::MissingRequired {
                question_id: question.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
