//! The `intake compare` command.

use std::path::PathBuf;

use anyhow::Result;

use intake_core::report::ScoreReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = ScoreReport::load_json(&baseline_path)?;
    let current = ScoreReport::load_json(&current_path)?;

    let changes = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", changes.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} declines, {} improvements, {} unchanged",
                changes.declines.len(),
                changes.improvements.len(),
                changes.unchanged
            );

            if !changes.declines.is_empty() {
                println!("\nDeclines:");
                for d in &changes.declines {
                    println!(
                        "  {} {} -> {} ({:+})",
                        d.respondent, d.baseline_score, d.current_score, d.delta
                    );
                }
            }

            if !changes.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &changes.improvements {
                    println!(
                        "  {} {} -> {} (+{})",
                        i.respondent, i.baseline_score, i.current_score, i.delta
                    );
                }
            }

            if changes.new_respondents > 0 {
                println!("\n{} new respondent(s)", changes.new_respondents);
            }
            if changes.dropped_respondents > 0 {
                println!("{} dropped respondent(s)", changes.dropped_respondents);
            }
        }
    }

    if fail_on_decline && changes.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
