//! CLI integration tests using assert_cmd.
//!
//! Each test works in its own temp directory seeded via `skillcheck init`,
//! so nothing depends on files from the repository checkout.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn skillcheck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("skillcheck").unwrap()
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    skillcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    skillcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created assessments/example.toml"))
        .stdout(predicate::str::contains("Created answers.toml"));

    assert!(dir.path().join("assessments/example.toml").exists());
    assert!(dir.path().join("answers.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn validate_example_assessment() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Assessment"))
        .stdout(predicate::str::contains("7 questions"))
        .stdout(predicate::str::contains("All assessments valid"));
}

#[test]
fn validate_directory() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--assessment")
        .arg("assessments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Assessment"));
}

#[test]
fn validate_nonexistent_file() {
    skillcheck()
        .arg("validate")
        .arg("--assessment")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn run_scores_perfect_sheet() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100%"))
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("Certificate: eligible"));

    assert!(dir.path().join("skillcheck-results/report.json").exists());
}

#[test]
fn run_writes_all_formats() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--format")
        .arg("all")
        .assert()
        .success();

    let results = dir.path().join("skillcheck-results");
    assert!(results.join("report.json").exists());
    assert!(results.join("report.md").exists());
    assert!(results.join("report.html").exists());
}

#[test]
fn run_rejects_unknown_format() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--format")
        .arg("pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn run_auto_submits_on_expiry() {
    let dir = init_workspace();

    // 30 minute limit, replay the full 1800 seconds.
    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--elapsed-secs")
        .arg("1800")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up"))
        .stdout(predicate::str::contains("Score: 100%"));
}

#[test]
fn run_skips_unknown_answer_ids() {
    let dir = init_workspace();
    let answers = dir.path().join("answers.toml");
    let mut content = std::fs::read_to_string(&answers).unwrap();
    content.push_str("ghost-question = true\n");
    std::fs::write(&answers, content).unwrap();

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100%"));
}

#[test]
fn run_records_profile_best_score() {
    let dir = init_workspace();
    let profile = dir.path().join("profile.json");

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("new best score 100%"));

    let saved = std::fs::read_to_string(&profile).unwrap();
    assert!(saved.contains("\"assessment_score\": 100"));

    // A second run cannot beat a perfect score.
    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("best score remains 100%"));
}

#[test]
fn report_rerenders_saved_json() {
    let dir = init_workspace();

    skillcheck()
        .current_dir(dir.path())
        .arg("run")
        .arg("--assessment")
        .arg("assessments/example.toml")
        .arg("--answers")
        .arg("answers.toml")
        .assert()
        .success();

    skillcheck()
        .current_dir(dir.path())
        .arg("report")
        .arg("--report")
        .arg("skillcheck-results/report.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100%"));

    skillcheck()
        .current_dir(dir.path())
        .arg("report")
        .arg("--report")
        .arg("skillcheck-results/report.json")
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Result: PASSED**"));
}
