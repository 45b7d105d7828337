//! The `intake score` command.

use std::path::PathBuf;

use anyhow::Result;

use intake_core::answers::validate_answers;
use intake_core::parser;
use intake_core::report::ScoreReport;
use intake_core::scoring::score_submission;
use intake_report::csv::write_csv_report;
use intake_report::html::write_html_report;

pub fn execute(
    questionnaire_path: PathBuf,
    answers_path: PathBuf,
    output: PathBuf,
    format: String,
    strict: bool,
) -> Result<()> {
    let questionnaire = parser::parse_questionnaire(&questionnaire_path)?;

    // Authoring problems don't block scoring, but the author should see them
    let warnings = parser::validate_questionnaire(&questionnaire);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("[{id}] "))
            .unwrap_or_default();
        eprintln!("Warning: {prefix}{}", w.message);
    }

    let submissions = parser::load_submissions(&answers_path)?;
    anyhow::ensure!(!submissions.is_empty(), "no submissions to score");

    if strict {
        let mut rejected = 0usize;
        for submission in &submissions {
            if let Err(errors) = validate_answers(&questionnaire, &submission.answers) {
                rejected += 1;
                for e in &errors {
                    eprintln!("  {}: {e}", submission.id);
                }
            }
        }
        anyhow::ensure!(
            rejected == 0,
            "{rejected} submission(s) failed strict validation"
        );
    }

    let scored = submissions
        .iter()
        .map(|s| score_submission(&questionnaire, s))
        .collect();
    let report = ScoreReport::new(&questionnaire, scored);

    print_summary(&report);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "csv"]
    } else {
        format.split(',').collect()
    };

    if formats.iter().any(|f| *f != "text") {
        std::fs::create_dir_all(&output)?;
    }
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" => {}
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "csv" => {
                let path = output.join(format!("report-{timestamp}.csv"));
                write_csv_report(&report, &path)?;
                eprintln!("CSV report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &ScoreReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Respondent", "Score", "Rating", "Answered"]);

    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(&entry.respondent),
            Cell::new(entry.breakdown.overall),
            Cell::new(entry.breakdown.rating),
            Cell::new(format!(
                "{}/{}",
                entry.breakdown.answered, entry.breakdown.total
            )),
        ]);
    }

    println!("{table}");
    println!(
        "\n{} submission(s), mean {:.1}, median {:.1}",
        report.aggregate.submission_count,
        report.aggregate.mean_score,
        report.aggregate.median_score
    );
}
