//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use intake_core::report::ScoreReport;
use intake_core::scoring::Rating;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a score report.
pub fn generate_html(report: &ScoreReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>intake report — {}</title>\n",
        html_escape(&report.questionnaire.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>intake report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Questionnaire: <strong>{}</strong> | {} questions | {} submissions | {}</p>\n",
        html_escape(&report.questionnaire.name),
        report.questionnaire.question_count,
        report.entries.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p>Mean score <strong>{:.1}</strong>, median <strong>{:.1}</strong></p>\n",
        report.aggregate.mean_score, report.aggregate.median_score
    ));

    if !report.entries.is_empty() {
        html.push_str(&generate_rating_chart(report));
    }

    // Per-question table
    if !report.aggregate.per_question.is_empty() {
        html.push_str("<table class=\"summary\">\n");
        html.push_str(
            "<thead><tr><th>Question</th><th>Answer rate</th><th>Mean score</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");
        let mut question_ids: Vec<_> = report.aggregate.per_question.keys().collect();
        question_ids.sort();
        for id in question_ids {
            let stats = &report.aggregate.per_question[id];
            html.push_str(&format!(
                "<tr><td>{}</td><td>{:.0}%</td><td>{:.1}</td></tr>\n",
                html_escape(id),
                stats.answer_rate * 100.0,
                stats.mean_score,
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("</section>\n");

    // Per-submission results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Submissions</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str("<thead><tr><th>Respondent</th><th>Submitted</th><th>Score</th><th>Rating</th><th>Answered</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for entry in &report.entries {
        let rating_class = match entry.breakdown.rating {
            Rating::Excellent | Rating::Good => "good",
            Rating::NeedsImprovement | Rating::Poor => "bad",
        };
        let submitted = entry
            .submitted_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
            rating_class,
            html_escape(&entry.respondent),
            submitted,
            entry.breakdown.overall,
            entry.breakdown.rating,
            entry.breakdown.answered,
            entry.breakdown.total,
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ScoreReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal SVG bar chart of the rating distribution.
fn generate_rating_chart(report: &ScoreReport) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let bands = [
        (Rating::Excellent, "#22c55e"),
        (Rating::Good, "#84cc16"),
        (Rating::NeedsImprovement, "#eab308"),
        (Rating::Poor, "#ef4444"),
    ];

    let total = report.entries.len().max(1);
    let total_height = bands.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (rating, color)) in bands.iter().enumerate() {
        let count = report
            .aggregate
            .rating_distribution
            .get(rating)
            .copied()
            .unwrap_or(0);
        let fraction = count as f64 / total as f64;
        let y = i * (bar_height + padding) + padding;
        let width = (fraction * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            rating
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --good: #dcfce7; --bad: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --good: #064e3b; --bad: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.good { background: var(--good); }
.bad { background: var(--bad); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
