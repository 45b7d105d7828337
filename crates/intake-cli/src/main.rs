//! intake CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "intake", version, about = "Questionnaire scoring toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score submissions against a questionnaire
    Score {
        /// Path to the questionnaire .toml
        #[arg(long)]
        questionnaire: PathBuf,

        /// Path to the submissions JSON (single object or array)
        #[arg(long)]
        answers: PathBuf,

        /// Output directory for report artifacts
        #[arg(long, default_value = "./intake-results")]
        output: PathBuf,

        /// Output format: text, json, html, csv, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Reject malformed answers instead of scoring them as 0
        #[arg(long)]
        strict: bool,
    },

    /// Validate questionnaire TOML files
    Validate {
        /// Path to questionnaire file or directory
        #[arg(long)]
        questionnaire: PathBuf,
    },

    /// Print aggregate statistics from a saved report
    Summary {
        /// Report JSON produced by `intake score`
        #[arg(long)]
        report: PathBuf,
    },

    /// Compare two score reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Change threshold in score points
        #[arg(long, default_value = "5")]
        threshold: f64,

        /// Exit code 1 if any respondent's score declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter questionnaire and example submissions
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            questionnaire,
            answers,
            output,
            format,
            strict,
        } => commands::score::execute(questionnaire, answers, output, format, strict),
        Commands::Validate { questionnaire } => commands::validate::execute(questionnaire),
        Commands::Summary { report } => commands::summary::execute(report),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
