//! The `intake validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(questionnaire_path: PathBuf) -> Result<()> {
    let questionnaires = if questionnaire_path.is_dir() {
        intake_core::parser::load_questionnaire_directory(&questionnaire_path)?
    } else {
        vec![intake_core::parser::parse_questionnaire(&questionnaire_path)?]
    };

    let mut total_warnings = 0;

    for questionnaire in &questionnaires {
        println!(
            "Questionnaire: {} ({} questions)",
            questionnaire.name,
            questionnaire.questions.len()
        );

        let warnings = intake_core::parser::validate_questionnaire(questionnaire);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All questionnaires valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
