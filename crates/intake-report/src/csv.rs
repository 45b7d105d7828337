//! CSV export of per-submission scores.
//!
//! A flat file for spreadsheet import: one row per scored submission.

use anyhow::Result;
use std::path::Path;

use intake_core::report::ScoreReport;

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a score report as CSV.
pub fn generate_csv(report: &ScoreReport) -> String {
    let mut csv = String::from("submission_id,respondent,submitted_at,score,rating,answered,total\n");

    for entry in &report.entries {
        let submitted = entry
            .submitted_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_escape(&entry.submission_id),
            csv_escape(&entry.respondent),
            submitted,
            entry.breakdown.overall,
            entry.breakdown.rating,
            entry.breakdown.answered,
            entry.breakdown.total,
        ));
    }

    csv
}

/// Write a CSV report to a file.
pub fn write_csv_report(report: &ScoreReport, path: &Path) -> Result<()> {
    let csv = generate_csv(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    Ok(())
}
