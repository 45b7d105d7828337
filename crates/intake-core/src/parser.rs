//! TOML questionnaire parser and JSON submission loader.
//!
//! Loads questionnaire definitions from TOML files and directories,
//! validates them, and loads respondent submissions from JSON.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionKind, Questionnaire, Submission};

/// Intermediate TOML structure for parsing questionnaire files.
#[derive(Debug, Deserialize)]
struct TomlQuestionnaireFile {
    questionnaire: TomlQuestionnaireHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionnaireHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    label: String,
    kind: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    option_scores: HashMap<String, f64>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    scorable: bool,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Parse a single TOML file into a `Questionnaire`.
pub fn parse_questionnaire(path: &Path) -> Result<Questionnaire> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read questionnaire file: {}", path.display()))?;

    parse_questionnaire_str(&content, path)
}

/// Parse a TOML string into a `Questionnaire` (useful for testing).
pub fn parse_questionnaire_str(content: &str, source_path: &Path) -> Result<Questionnaire> {
    let parsed: TomlQuestionnaireFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind = match q.kind.as_str() {
                "short_text" => QuestionKind::ShortText,
                "long_text" => QuestionKind::LongText,
                "single_select" => QuestionKind::SingleSelect {
                    options: q.options,
                    option_scores: q.option_scores,
                },
                "multi_select" => QuestionKind::MultiSelect {
                    options: q.options,
                    option_scores: q.option_scores,
                },
                "scale" => QuestionKind::Scale,
                other => anyhow::bail!("question '{}': unknown kind '{}'", q.id, other),
            };

            Ok(Question {
                id: q.id,
                label: q.label,
                kind,
                required: q.required,
                scorable: q.scorable,
                weight: q.weight,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Questionnaire {
        id: parsed.questionnaire.id,
        name: parsed.questionnaire.name,
        description: parsed.questionnaire.description,
        questions,
    })
}

/// Recursively load all `.toml` questionnaire files from a directory.
pub fn load_questionnaire_directory(dir: &Path) -> Result<Vec<Questionnaire>> {
    let mut questionnaires = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            questionnaires.extend(load_questionnaire_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_questionnaire(&path) {
                Ok(q) => questionnaires.push(q),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(questionnaires)
}

/// JSON submission files hold either one submission or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<Submission>),
    Many(Vec<Submission>),
}

/// Load submissions from a JSON file (single object or array).
pub fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions file: {}", path.display()))?;

    let parsed: OneOrMany = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse submissions JSON: {}", path.display()))?;

    Ok(match parsed {
        OneOrMany::One(s) => vec![*s],
        OneOrMany::Many(s) => s,
    })
}

/// A warning from questionnaire validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a questionnaire for common authoring mistakes.
pub fn validate_questionnaire(questionnaire: &Questionnaire) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for q in &questionnaire.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in &questionnaire.questions {
        if q.label.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "label is empty".into(),
            });
        }

        // Text questions have no scoring rule and silently score 0
        if q.scorable && q.kind.is_text() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("{} questions cannot be scored; it will count as 0", q.kind),
            });
        }

        if q.scorable && (!q.weight.is_finite() || q.weight < 0.0) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("weight {} is not a finite non-negative number", q.weight),
            });
        }

        if let (Some(options), Some(scores)) = (q.kind.options(), q.kind.option_scores()) {
            if options.is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: "select question has no options".into(),
                });
            }

            for option in scores.keys() {
                if !options.iter().any(|o| o == option) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: format!("option_scores entry '{option}' is not an option"),
                    });
                }
            }
            for (option, score) in scores {
                if !(0.0..=100.0).contains(score) || !score.is_finite() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: format!("option '{option}' score {score} is outside 0-100"),
                    });
                }
            }
            if q.scorable && scores.is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: "scorable select question has no option_scores; every answer scores 0"
                        .into(),
                });
            }
        }
    }

    warnings
}
