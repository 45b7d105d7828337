//! Aggregate statistics across a batch of scored submissions.
//!
//! Summarizes how a group of respondents did on one questionnaire: overall
//! score distribution plus per-question answer rates and averages.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Questionnaire;
use crate::scoring::{Rating, ScoredSubmission};

/// Aggregate statistics over all submissions in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of submissions aggregated.
    pub submission_count: usize,
    /// Mean of the aggregate scores.
    pub mean_score: f64,
    /// Median of the aggregate scores.
    pub median_score: f64,
    /// How many submissions landed in each rating band.
    pub rating_distribution: HashMap<Rating, usize>,
    /// Per-question statistics, keyed by question id (scorable questions
    /// only).
    pub per_question: HashMap<String, QuestionStats>,
}

/// Statistics for a single scorable question across all submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionStats {
    /// Question identifier.
    pub question_id: String,
    /// Fraction of submissions that answered this question.
    pub answer_rate: f64,
    /// Mean per-question score across all submissions (unanswered count 0).
    pub mean_score: f64,
}

/// Compute aggregate statistics from scored submissions.
pub fn compute_aggregate_stats(
    scored: &[ScoredSubmission],
    questionnaire: &Questionnaire,
) -> AggregateStats {
    let n = scored.len();

    let mut scores: Vec<u8> = scored.iter().map(|s| s.breakdown.overall).collect();
    scores.sort_unstable();

    let mean_score = if n == 0 {
        0.0
    } else {
        scores.iter().map(|&s| s as f64).sum::<f64>() / n as f64
    };

    let median_score = match n {
        0 => 0.0,
        _ if n % 2 == 1 => scores[n / 2] as f64,
        _ => (scores[n / 2 - 1] as f64 + scores[n / 2] as f64) / 2.0,
    };

    let mut rating_distribution: HashMap<Rating, usize> = HashMap::new();
    for s in scored {
        *rating_distribution.entry(s.breakdown.rating).or_default() += 1;
    }

    let mut per_question = HashMap::new();
    for question in questionnaire.scorable_questions() {
        let mut answered = 0usize;
        let mut score_sum = 0.0f64;
        for s in scored {
            if let Some(entry) = s
                .breakdown
                .questions
                .iter()
                .find(|q| q.question_id == question.id)
            {
                if entry.answered {
                    answered += 1;
                }
                score_sum += entry.score;
            }
        }
        per_question.insert(
            question.id.clone(),
            QuestionStats {
                question_id: question.id.clone(),
                answer_rate: if n == 0 { 0.0 } else { answered as f64 / n as f64 },
                mean_score: if n == 0 { 0.0 } else { score_sum / n as f64 },
            },
        );
    }

    AggregateStats {
        submission_count: n,
        mean_score,
        median_score,
        rating_distribution,
        per_question,
    }
}
