//! Score report types with JSON persistence and change detection.
//!
//! A report captures one scoring run: every submission scored against one
//! questionnaire, plus aggregate statistics. Reports can be compared against
//! an earlier baseline to spot respondents whose scores declined between
//! check-ins.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Questionnaire;
use crate::scoring::ScoredSubmission;
use crate::statistics::{compute_aggregate_stats, AggregateStats};

/// A complete scoring report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the questionnaire scored against.
    pub questionnaire: QuestionnaireSummary,
    /// Individual scored submissions.
    pub entries: Vec<ScoredSubmission>,
    /// Aggregate statistics.
    pub aggregate: AggregateStats,
}

/// Summary of a questionnaire (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl ScoreReport {
    /// Build a report from scored submissions.
    pub fn new(questionnaire: &Questionnaire, entries: Vec<ScoredSubmission>) -> Self {
        let aggregate = compute_aggregate_stats(&entries, questionnaire);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            questionnaire: QuestionnaireSummary {
                id: questionnaire.id.clone(),
                name: questionnaire.name.clone(),
                question_count: questionnaire.questions.len(),
            },
            entries,
            aggregate,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline to detect score changes.
    ///
    /// Respondents are matched by name; where a respondent has several
    /// submissions in a report, their best score is used. `threshold` is in
    /// score points: smaller moves count as unchanged.
    pub fn compare(&self, baseline: &ScoreReport, threshold: f64) -> ChangeReport {
        use std::collections::HashMap;

        let best_scores = |report: &ScoreReport| -> HashMap<String, u8> {
            let mut map: HashMap<String, u8> = HashMap::new();
            for entry in &report.entries {
                let best = map.entry(entry.respondent.clone()).or_insert(0);
                if entry.breakdown.overall > *best {
                    *best = entry.breakdown.overall;
                }
            }
            map
        };

        let baseline_scores = best_scores(baseline);
        let current_scores = best_scores(self);

        let mut declines = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_respondents = 0usize;

        for (respondent, &current) in &current_scores {
            if let Some(&baseline_val) = baseline_scores.get(respondent) {
                let delta = current as i16 - baseline_val as i16;
                if (delta as f64) < -threshold {
                    declines.push(ScoreChange {
                        respondent: respondent.clone(),
                        baseline_score: baseline_val,
                        current_score: current,
                        delta,
                    });
                } else if delta as f64 > threshold {
                    improvements.push(ScoreChange {
                        respondent: respondent.clone(),
                        baseline_score: baseline_val,
                        current_score: current,
                        delta,
                    });
                } else {
                    unchanged += 1;
                }
            } else {
                new_respondents += 1;
            }
        }

        let dropped_respondents = baseline_scores
            .keys()
            .filter(|r| !current_scores.contains_key(*r))
            .count();

        ChangeReport {
            declines,
            improvements,
            unchanged,
            new_respondents,
            dropped_respondents,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Respondents whose score went down.
    pub declines: Vec<ScoreChange>,
    /// Respondents whose score went up.
    pub improvements: Vec<ScoreChange>,
    /// Respondents with no significant change.
    pub unchanged: usize,
    /// Respondents in current but not baseline.
    pub new_respondents: usize,
    /// Respondents in baseline but not current.
    pub dropped_respondents: usize,
}

/// A respondent's score movement between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub respondent: String,
    pub baseline_score: u8,
    pub current_score: u8,
    pub delta: i16,
}

impl ChangeReport {
    /// Format the change report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} declines, {} improvements, {} unchanged\n\n",
            self.declines.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.declines.is_empty() {
            md.push_str("### Declines\n\n");
            md.push_str("| Respondent | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|---------|-------|\n");
            for d in &self.declines {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    d.respondent, d.baseline_score, d.current_score, d.delta
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Respondent | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {} | +{} |\n",
                    i.respondent, i.baseline_score, i.current_score, i.delta
                ));
            }
        }

        md
    }

    /// Returns true if any respondent's score declined.
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }
}
