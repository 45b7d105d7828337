//! The `intake summary` command.

use std::path::PathBuf;

use anyhow::Result;

use intake_core::report::ScoreReport;
use intake_core::scoring::Rating;

pub fn execute(report_path: PathBuf) -> Result<()> {
    use comfy_table::{Cell, Table};

    let report = ScoreReport::load_json(&report_path)?;

    println!(
        "Questionnaire: {} | {} submission(s) | {}",
        report.questionnaire.name,
        report.aggregate.submission_count,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Mean score {:.1}, median {:.1}",
        report.aggregate.mean_score, report.aggregate.median_score
    );

    let bands = [
        Rating::Excellent,
        Rating::Good,
        Rating::NeedsImprovement,
        Rating::Poor,
    ];
    let distribution: Vec<String> = bands
        .iter()
        .map(|rating| {
            let count = report
                .aggregate
                .rating_distribution
                .get(rating)
                .copied()
                .unwrap_or(0);
            format!("{rating}: {count}")
        })
        .collect();
    println!("Ratings: {}", distribution.join(", "));

    if !report.aggregate.per_question.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Question", "Answer rate", "Mean score"]);

        let mut question_ids: Vec<_> = report.aggregate.per_question.keys().collect();
        question_ids.sort();
        for id in question_ids {
            let stats = &report.aggregate.per_question[id];
            table.add_row(vec![
                Cell::new(id),
                Cell::new(format!("{:.0}%", stats.answer_rate * 100.0)),
                Cell::new(format!("{:.1}", stats.mean_score)),
            ]);
        }

        println!("\n{table}");
    }

    Ok(())
}
