//! The questionnaire scoring engine.
//!
//! A pure weighted-average computation over a questionnaire definition and a
//! respondent's answers. The engine is total: it never fails, and any
//! unresolvable per-question value (unanswered, unknown option, non-numeric
//! scale rating, wrong answer shape) contributes 0 instead of erroring.
//! Callers needing strict validation run [`crate::answers::validate_answers`]
//! first.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AnswerSet, AnswerValue, Question, QuestionKind, Questionnaire, Submission};

/// Points a scale rating is out of. Ratings arrive as numeric strings in
/// the inclusive range 0-10.
const SCALE_MAX: f64 = 10.0;

/// Compute the aggregate score for one submission, as an integer 0-100.
///
/// Non-scorable questions are skipped. Each scorable question contributes a
/// per-question score in 0-100 multiplied by its weight; the result is the
/// rounded weighted average. A questionnaire with no scorable weight returns
/// 0.
///
/// Unanswered scorable questions contribute 0 to the weighted sum but their
/// weight stays in the denominator, so skipping questions lowers the score.
///
/// Out-of-range scale ratings (e.g. "15" on a 0-10 scale) are not clamped;
/// rejecting them is the caller's job, before scoring.
pub fn compute_score(questionnaire: &Questionnaire, answers: &AnswerSet) -> u8 {
    let mut total_weighted = 0.0f64;
    let mut total_weight = 0.0f64;

    for question in questionnaire.scorable_questions() {
        let score = question_score(question, answers.get(&question.id));
        total_weighted += score * question.weight;
        total_weight += question.weight;
    }

    if total_weight == 0.0 {
        return 0;
    }

    (total_weighted / total_weight).round() as u8
}

/// Score a single question in 0-100 given its (possibly absent) answer.
pub fn question_score(question: &Question, answer: Option<&AnswerValue>) -> f64 {
    match &question.kind {
        QuestionKind::SingleSelect { option_scores, .. } => answer
            .and_then(AnswerValue::as_text)
            .map(|option| option_scores.get(option).copied().unwrap_or(0.0))
            .unwrap_or(0.0),

        QuestionKind::MultiSelect { option_scores, .. } => {
            match answer.and_then(AnswerValue::as_selections) {
                Some(selected) if !selected.is_empty() => {
                    let sum: f64 = selected
                        .iter()
                        .map(|option| option_scores.get(option).copied().unwrap_or(0.0))
                        .sum();
                    sum / selected.len() as f64
                }
                _ => 0.0,
            }
        }

        QuestionKind::Scale => answer
            .and_then(AnswerValue::as_text)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .map(|value| value / SCALE_MAX * 100.0)
            .unwrap_or(0.0),

        // Text questions carry no scoring rule. If one is mistakenly flagged
        // scorable it contributes 0 rather than inventing a text heuristic.
        QuestionKind::ShortText | QuestionKind::LongText => 0.0,
    }
}

/// Qualitative label for an aggregate score, at fixed thresholds 80/60/40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    /// Classify an aggregate score.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Rating::Excellent,
            60..=79 => Rating::Good,
            40..=59 => Rating::NeedsImprovement,
            _ => Rating::Poor,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NeedsImprovement => "Needs improvement",
            Rating::Poor => "Poor",
        };
        write!(f, "{label}")
    }
}

/// Per-question detail produced alongside the aggregate score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScore {
    /// The question scored.
    pub question_id: String,
    /// The question's weight in the aggregate.
    pub weight: f64,
    /// Per-question score in 0-100.
    pub score: f64,
    /// Whether the respondent answered at all.
    pub answered: bool,
}

/// The aggregate score for one submission with per-question detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// The aggregate score, 0-100.
    pub overall: u8,
    /// Qualitative label for `overall`.
    pub rating: Rating,
    /// Questions answered, over all questions (scorable or not).
    pub answered: usize,
    /// Total question count.
    pub total: usize,
    /// One entry per scorable question, in questionnaire order.
    pub questions: Vec<QuestionScore>,
}

/// Compute the aggregate score plus per-question detail.
///
/// The `overall` field always equals [`compute_score`] for the same inputs.
pub fn score_breakdown(questionnaire: &Questionnaire, answers: &AnswerSet) -> ScoreBreakdown {
    let questions: Vec<QuestionScore> = questionnaire
        .scorable_questions()
        .map(|question| QuestionScore {
            question_id: question.id.clone(),
            weight: question.weight,
            score: question_score(question, answers.get(&question.id)),
            answered: answers.contains_key(&question.id),
        })
        .collect();

    let answered = questionnaire
        .questions
        .iter()
        .filter(|q| answers.contains_key(&q.id))
        .count();

    let overall = compute_score(questionnaire, answers);

    ScoreBreakdown {
        overall,
        rating: Rating::from_score(overall),
        answered,
        total: questionnaire.questions.len(),
        questions,
    }
}

/// One submission scored against a questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSubmission {
    /// The submission's id.
    pub submission_id: String,
    /// Who submitted.
    pub respondent: String,
    /// When the submission was made, if known.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Aggregate score with per-question detail.
    pub breakdown: ScoreBreakdown,
}

/// Score one submission.
pub fn score_submission(questionnaire: &Questionnaire, submission: &Submission) -> ScoredSubmission {
    ScoredSubmission {
        submission_id: submission.id.clone(),
        respondent: submission.respondent.clone(),
        submitted_at: submission.submitted_at,
        breakdown: score_breakdown(questionnaire, &submission.answers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scale_question(id: &str, weight: f64) -> Question {
        Question {
            id: id.into(),
            label: format!("Rate {id}"),
            kind: QuestionKind::Scale,
            required: false,
            scorable: true,
            weight,
        }
    }

    fn single_select(id: &str, weight: f64, scores: &[(&str, f64)]) -> Question {
        let options = scores.iter().map(|(o, _)| o.to_string()).collect();
        let option_scores = scores
            .iter()
            .map(|(o, s)| (o.to_string(), *s))
            .collect::<HashMap<_, _>>();
        Question {
            id: id.into(),
            label: format!("Pick {id}"),
            kind: QuestionKind::SingleSelect {
                options,
                option_scores,
            },
            required: false,
            scorable: true,
            weight,
        }
    }

    fn questionnaire(questions: Vec<Question>) -> Questionnaire {
        Questionnaire {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            questions,
        }
    }

    fn answer(pairs: &[(&str, &str)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(id, v)| (id.to_string(), AnswerValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn no_scorable_questions_scores_zero() {
        let q = questionnaire(vec![Question {
            id: "notes".into(),
            label: "Notes".into(),
            kind: QuestionKind::LongText,
            required: false,
            scorable: false,
            weight: 1.0,
        }]);
        assert_eq!(compute_score(&q, &AnswerSet::new()), 0);
    }

    #[test]
    fn all_zero_weights_scores_zero() {
        let q = questionnaire(vec![scale_question("a", 0.0), scale_question("b", 0.0)]);
        let answers = answer(&[("a", "10"), ("b", "10")]);
        assert_eq!(compute_score(&q, &answers), 0);
    }

    #[test]
    fn scale_boundaries() {
        let q = questionnaire(vec![scale_question("energy", 1.0)]);
        assert_eq!(compute_score(&q, &answer(&[("energy", "10")])), 100);
        assert_eq!(compute_score(&q, &answer(&[("energy", "0")])), 0);
        assert_eq!(compute_score(&q, &answer(&[("energy", "5")])), 50);
    }

    #[test]
    fn scale_non_numeric_scores_zero() {
        let q = questionnaire(vec![scale_question("energy", 1.0)]);
        assert_eq!(compute_score(&q, &answer(&[("energy", "great")])), 0);
        assert_eq!(compute_score(&q, &answer(&[("energy", "NaN")])), 0);
    }

    #[test]
    fn scale_out_of_range_is_not_clamped() {
        // Deliberate: upstream validation owns range checks, and clamping
        // here would mask its bugs.
        let q = questionnaire(vec![scale_question("energy", 1.0)]);
        assert_eq!(compute_score(&q, &answer(&[("energy", "15")])), 150);
    }

    #[test]
    fn single_select_scored_options() {
        let q = questionnaire(vec![single_select("meals", 1.0, &[("A", 100.0), ("B", 0.0)])]);
        assert_eq!(compute_score(&q, &answer(&[("meals", "A")])), 100);
        assert_eq!(compute_score(&q, &answer(&[("meals", "B")])), 0);
        assert_eq!(compute_score(&q, &AnswerSet::new()), 0);
    }

    #[test]
    fn single_select_unknown_option_scores_zero() {
        let q = questionnaire(vec![single_select("meals", 1.0, &[("A", 100.0)])]);
        assert_eq!(compute_score(&q, &answer(&[("meals", "Z")])), 0);
    }

    #[test]
    fn weighted_combination() {
        let q = questionnaire(vec![
            scale_question("energy", 8.0),
            single_select("meals", 2.0, &[("Skipped", 0.0), ("All", 100.0)]),
        ]);
        let answers = answer(&[("energy", "10"), ("meals", "Skipped")]);
        // round((100*8 + 0*2) / 10) = 80
        assert_eq!(compute_score(&q, &answers), 80);
    }

    #[test]
    fn multi_select_averages_selected_options() {
        let scores: HashMap<String, f64> = [("X", 100.0), ("Y", 50.0), ("Z", 0.0)]
            .into_iter()
            .map(|(o, s)| (o.to_string(), s))
            .collect();
        let q = questionnaire(vec![Question {
            id: "habits".into(),
            label: "Habits".into(),
            kind: QuestionKind::MultiSelect {
                options: vec!["X".into(), "Y".into(), "Z".into()],
                option_scores: scores,
            },
            required: false,
            scorable: true,
            weight: 1.0,
        }]);

        let mut answers = AnswerSet::new();
        answers.insert(
            "habits".into(),
            AnswerValue::Selections(vec!["X".into(), "Y".into()]),
        );
        // round((100 + 50) / 2) = 75
        assert_eq!(compute_score(&q, &answers), 75);

        answers.insert("habits".into(), AnswerValue::Selections(vec![]));
        assert_eq!(compute_score(&q, &answers), 0);
    }

    #[test]
    fn multi_select_unknown_options_count_as_zero() {
        let scores: HashMap<String, f64> =
            [("X".to_string(), 100.0)].into_iter().collect();
        let q = questionnaire(vec![Question {
            id: "habits".into(),
            label: "Habits".into(),
            kind: QuestionKind::MultiSelect {
                options: vec!["X".into()],
                option_scores: scores,
            },
            required: false,
            scorable: true,
            weight: 1.0,
        }]);
        let mut answers = AnswerSet::new();
        answers.insert(
            "habits".into(),
            AnswerValue::Selections(vec!["X".into(), "Unknown".into()]),
        );
        // (100 + 0) / 2 = 50
        assert_eq!(compute_score(&q, &answers), 50);
    }

    #[test]
    fn unanswered_question_stays_in_denominator() {
        let q = questionnaire(vec![
            scale_question("answered", 1.0),
            scale_question("skipped", 1.0),
        ]);
        // 100 from the answered question averaged against 0 for the skipped
        // one, not 100 over the answered question alone.
        assert_eq!(compute_score(&q, &answer(&[("answered", "10")])), 50);
    }

    #[test]
    fn scorable_text_question_contributes_zero() {
        let q = questionnaire(vec![
            Question {
                id: "notes".into(),
                label: "Notes".into(),
                kind: QuestionKind::ShortText,
                required: false,
                scorable: true,
                weight: 1.0,
            },
            scale_question("energy", 1.0),
        ]);
        // The text question stays in the denominator but scores 0.
        assert_eq!(compute_score(&q, &answer(&[("energy", "10"), ("notes", "hi")])), 50);
    }

    #[test]
    fn wrong_answer_shape_scores_zero() {
        let q = questionnaire(vec![single_select("meals", 1.0, &[("A", 100.0)])]);
        let mut answers = AnswerSet::new();
        answers.insert("meals".into(), AnswerValue::Selections(vec!["A".into()]));
        assert_eq!(compute_score(&q, &answers), 0);
    }

    #[test]
    fn idempotent() {
        let q = questionnaire(vec![
            scale_question("energy", 3.0),
            single_select("meals", 2.0, &[("A", 70.0), ("B", 30.0)]),
        ]);
        let answers = answer(&[("energy", "7"), ("meals", "B")]);
        assert_eq!(compute_score(&q, &answers), compute_score(&q, &answers));
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(Rating::from_score(100), Rating::Excellent);
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(60), Rating::Good);
        assert_eq!(Rating::from_score(59), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(40), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(39), Rating::Poor);
        assert_eq!(Rating::from_score(0), Rating::Poor);
    }

    #[test]
    fn breakdown_matches_compute_score() {
        let q = questionnaire(vec![
            scale_question("energy", 8.0),
            single_select("meals", 2.0, &[("Skipped", 0.0), ("All", 100.0)]),
            Question {
                id: "notes".into(),
                label: "Notes".into(),
                kind: QuestionKind::LongText,
                required: false,
                scorable: false,
                weight: 1.0,
            },
        ]);
        let answers = answer(&[("energy", "10"), ("meals", "Skipped")]);

        let breakdown = score_breakdown(&q, &answers);
        assert_eq!(breakdown.overall, compute_score(&q, &answers));
        assert_eq!(breakdown.rating, Rating::Excellent);
        assert_eq!(breakdown.answered, 2);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.questions.len(), 2);
        assert!(breakdown.questions[0].answered);
        assert_eq!(breakdown.questions[0].score, 100.0);
        assert_eq!(breakdown.questions[1].score, 0.0);
    }
}
