//! Core data model types for intake.
//!
//! These are the fundamental types the entire intake system uses to
//! represent questionnaires, questions, and respondent submissions.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The type-specific shape of a question.
///
/// Option scores and selectable options only exist for select questions, so
/// they live on the variant rather than as nullable fields on [`Question`].
/// This keeps per-type score computation exhaustive at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-form one-line text. Never contributes to the score.
    ShortText,
    /// Free-form paragraph text. Never contributes to the score.
    LongText,
    /// Exactly one option from a fixed list.
    SingleSelect {
        /// Selectable options, in display order.
        options: Vec<String>,
        /// Points (0-100) per option. Options missing from the map score 0.
        #[serde(default)]
        option_scores: HashMap<String, f64>,
    },
    /// Any number of options from a fixed list.
    MultiSelect {
        /// Selectable options, in display order.
        options: Vec<String>,
        /// Points (0-100) per option. Options missing from the map score 0.
        #[serde(default)]
        option_scores: HashMap<String, f64>,
    },
    /// Numeric rating on an inclusive 0-10 scale, submitted as a string.
    Scale,
}

impl QuestionKind {
    /// Returns `true` for free-text kinds, which never score.
    pub fn is_text(&self) -> bool {
        matches!(self, QuestionKind::ShortText | QuestionKind::LongText)
    }

    /// The selectable options, if this is a select kind.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::SingleSelect { options, .. }
            | QuestionKind::MultiSelect { options, .. } => Some(options),
            _ => None,
        }
    }

    /// The option score map, if this is a select kind.
    pub fn option_scores(&self) -> Option<&HashMap<String, f64>> {
        match self {
            QuestionKind::SingleSelect { option_scores, .. }
            | QuestionKind::MultiSelect { option_scores, .. } => Some(option_scores),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::ShortText => "short_text",
            QuestionKind::LongText => "long_text",
            QuestionKind::SingleSelect { .. } => "single_select",
            QuestionKind::MultiSelect { .. } => "multi_select",
            QuestionKind::Scale => "scale",
        };
        write!(f, "{name}")
    }
}

/// A single question within a questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the questionnaire.
    pub id: String,
    /// The text shown to the respondent.
    pub label: String,
    /// Type-specific configuration.
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Whether an answer is required to submit.
    #[serde(default)]
    pub required: bool,
    /// Whether this question contributes to the aggregate score.
    #[serde(default)]
    pub scorable: bool,
    /// Relative importance in the weighted average. Only meaningful when
    /// `scorable`; a weight of 0 contributes nothing.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// An ordered collection of questions.
///
/// Question order is insertion order and is preserved for display and
/// review; scoring itself is order-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// Unique identifier for this questionnaire.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this questionnaire measures.
    #[serde(default)]
    pub description: String,
    /// The questions, in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Iterate over the questions that contribute to the score.
    pub fn scorable_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.scorable)
    }
}

/// A respondent's answer to a single question.
///
/// Text, single-select, and scale answers are all strings on the wire;
/// multi-select answers are string lists. The untagged representation
/// matches the submission JSON produced by the form frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A single string: free text, a chosen option, or a scale rating.
    Text(String),
    /// The chosen options of a multi-select question.
    Selections(Vec<String>),
}

impl AnswerValue {
    /// The answer as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Selections(_) => None,
        }
    }

    /// The answer as a selection list, if it is one.
    pub fn as_selections(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selections(s) => Some(s),
            AnswerValue::Text(_) => None,
        }
    }
}

/// Answers keyed by question id. A missing key means "unanswered".
pub type AnswerSet = HashMap<String, AnswerValue>;

/// A completed questionnaire submission from one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier for this submission.
    pub id: String,
    /// Who submitted (client id or display name, opaque to scoring).
    pub respondent: String,
    /// When the submission was made, if known.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// The answers, keyed by question id.
    #[serde(default)]
    pub answers: AnswerSet,
}
