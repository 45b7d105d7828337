//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn intake() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("intake").unwrap()
}

const MINI_QUESTIONNAIRE: &str = r#"[questionnaire]
id = "mini"
name = "Mini"

[[questions]]
id = "energy"
label = "Energy, 0-10?"
kind = "scale"
required = true
scorable = true
"#;

#[test]
fn validate_weekly_check_in() {
    intake()
        .arg("validate")
        .arg("--questionnaire")
        .arg("../../forms/weekly-check-in.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 questions"))
        .stdout(predicate::str::contains("All questionnaires valid"));
}

#[test]
fn validate_directory() {
    intake()
        .arg("validate")
        .arg("--questionnaire")
        .arg("../../forms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Check-in"))
        .stdout(predicate::str::contains("Initial Intake"));
}

#[test]
fn validate_nonexistent_file() {
    intake()
        .arg("validate")
        .arg("--questionnaire")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"[questionnaire]
id = "bad"
name = "Bad"

[[questions]]
id = "notes"
label = "Notes"
kind = "short_text"
scorable = true
"#,
    )
    .unwrap();

    intake()
        .arg("validate")
        .arg("--questionnaire")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    intake()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created forms/weekly-check-in.toml"))
        .stdout(predicate::str::contains("Created submissions/example.json"));

    assert!(dir.path().join("forms/weekly-check-in.toml").exists());
    assert!(dir.path().join("submissions/example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    intake()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    intake()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn score_example_submissions() {
    let out = TempDir::new().unwrap();

    intake()
        .arg("score")
        .arg("--questionnaire")
        .arg("../../forms/weekly-check-in.toml")
        .arg("--answers")
        .arg("../../submissions/example.json")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"))
        .stdout(predicate::str::contains("grace"))
        .stdout(predicate::str::contains("2 submission(s)"));

    let json_files: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(json_files.len(), 1);
}

#[test]
fn score_strict_rejects_malformed_answers() {
    let dir = TempDir::new().unwrap();
    let form = dir.path().join("mini.toml");
    let answers = dir.path().join("answers.json");
    std::fs::write(&form, MINI_QUESTIONNAIRE).unwrap();
    std::fs::write(
        &answers,
        r#"{"id": "s1", "respondent": "ada", "answers": {"energy": "15"}}"#,
    )
    .unwrap();

    intake()
        .arg("score")
        .arg("--questionnaire")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict validation"))
        .stderr(predicate::str::contains("outside 0-10"));
}

#[test]
fn score_without_strict_accepts_malformed_answers() {
    let dir = TempDir::new().unwrap();
    let form = dir.path().join("mini.toml");
    let answers = dir.path().join("answers.json");
    std::fs::write(&form, MINI_QUESTIONNAIRE).unwrap();
    std::fs::write(
        &answers,
        r#"{"id": "s1", "respondent": "ada", "answers": {"energy": "pretty good"}}"#,
    )
    .unwrap();

    intake()
        .arg("score")
        .arg("--questionnaire")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"));
}

fn write_report(dir: &std::path::Path, name: &str, rating: &str) -> std::path::PathBuf {
    let form = dir.join("mini.toml");
    let answers = dir.join(format!("{name}-answers.json"));
    let out = dir.join(name);
    std::fs::write(&form, MINI_QUESTIONNAIRE).unwrap();
    std::fs::write(
        &answers,
        format!(r#"{{"id": "s1", "respondent": "ada", "answers": {{"energy": "{rating}"}}}}"#),
    )
    .unwrap();

    intake()
        .arg("score")
        .arg("--questionnaire")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .unwrap()
        .path()
}

#[test]
fn compare_reports_detects_decline() {
    let dir = TempDir::new().unwrap();
    let baseline = write_report(dir.path(), "baseline", "9");
    let current = write_report(dir.path(), "current", "3");

    intake()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 declines"))
        .stdout(predicate::str::contains("ada"));
}

#[test]
fn compare_fail_on_decline_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    let baseline = write_report(dir.path(), "baseline", "9");
    let current = write_report(dir.path(), "current", "3");

    intake()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-decline")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    intake()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn summary_prints_aggregate() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "only", "8");

    intake()
        .arg("summary")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini"))
        .stdout(predicate::str::contains("Mean score 80.0"))
        .stdout(predicate::str::contains("Excellent: 1"));
}

#[test]
fn help_output() {
    intake()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questionnaire scoring toolkit"));
}

#[test]
fn version_output() {
    intake()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("intake"));
}
