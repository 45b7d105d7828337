//! The `intake init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create example questionnaire
    std::fs::create_dir_all("forms")?;
    let form_path = std::path::Path::new("forms/weekly-check-in.toml");
    if form_path.exists() {
        println!("forms/weekly-check-in.toml already exists, skipping.");
    } else {
        std::fs::write(form_path, EXAMPLE_QUESTIONNAIRE)?;
        println!("Created forms/weekly-check-in.toml");
    }

    // Create example submissions
    std::fs::create_dir_all("submissions")?;
    let submissions_path = std::path::Path::new("submissions/example.json");
    if submissions_path.exists() {
        println!("submissions/example.json already exists, skipping.");
    } else {
        std::fs::write(submissions_path, EXAMPLE_SUBMISSIONS)?;
        println!("Created submissions/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit forms/weekly-check-in.toml to match your program");
    println!("  2. Run: intake validate --questionnaire forms/weekly-check-in.toml");
    println!("  3. Run: intake score --questionnaire forms/weekly-check-in.toml --answers submissions/example.json");

    Ok(())
}

const EXAMPLE_QUESTIONNAIRE: &str = r#"[questionnaire]
id = "weekly-check-in"
name = "Weekly Check-in"
description = "Weekly adherence and wellbeing check-in"

[[questions]]
id = "energy"
label = "How was your energy this week, 0-10?"
kind = "scale"
required = true
scorable = true
weight = 2.0

[[questions]]
id = "meals"
label = "How many of your planned meals did you follow?"
kind = "single_select"
options = ["All of them", "Most of them", "A few", "None"]
required = true
scorable = true
weight = 3.0

[questions.option_scores]
"All of them" = 100
"Most of them" = 70
"A few" = 30
"None" = 0

[[questions]]
id = "habits"
label = "Which habits did you keep up?"
kind = "multi_select"
options = ["Drank enough water", "Slept 7+ hours", "Exercised twice", "No late snacking"]
scorable = true

[questions.option_scores]
"Drank enough water" = 100
"Slept 7+ hours" = 100
"Exercised twice" = 100
"No late snacking" = 100

[[questions]]
id = "notes"
label = "Anything else you want to share?"
kind = "long_text"
"#;

const EXAMPLE_SUBMISSIONS: &str = r#"[
  {
    "id": "sub-001",
    "respondent": "ada",
    "submitted_at": "2026-08-17T09:30:00Z",
    "answers": {
      "energy": "8",
      "meals": "Most of them",
      "habits": ["Drank enough water", "Slept 7+ hours"],
      "notes": "Felt much better this week."
    }
  },
  {
    "id": "sub-002",
    "respondent": "grace",
    "submitted_at": "2026-08-17T14:10:00Z",
    "answers": {
      "energy": "4",
      "meals": "A few",
      "habits": ["Exercised twice"]
    }
  }
]
"#;
