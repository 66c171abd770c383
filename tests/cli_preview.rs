use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn preview() -> Command {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("recurrence_preview").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(dir.path().join("config.json"));
    cmd
}

#[test]
fn prints_month_occurrences_and_next_date() {
    preview()
        .args([
            "--rule",
            r#"{"frequency":"monthly","dayOfMonth":31}"#,
            "--start",
            "2024-01-31",
            "--year",
            "2024",
            "--month",
            "2",
            "--next-after",
            "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(contains("Monthly occurrences in 2024-02: 1"))
        .stdout(contains("2024-02-29 (Thu)"))
        .stdout(contains("Next after 2024-03-01: 2024-03-31"));
}

#[test]
fn reports_exhausted_schedule() {
    preview()
        .args([
            "--rule",
            r#"{"frequency":"weekly"}"#,
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-10",
            "--year",
            "2024",
            "--month",
            "1",
            "--next-after",
            "2024-01-08",
        ])
        .assert()
        .success()
        .stdout(contains("Weekly occurrences in 2024-01: 2"))
        .stdout(contains("(past end date, schedule exhausted)"));
}

#[test]
fn unknown_frequency_fails() {
    preview()
        .args([
            "--rule",
            r#"{"frequency":"hourly"}"#,
            "--start",
            "2024-01-01",
            "--year",
            "2024",
            "--month",
            "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown recurrence frequency: hourly"));
}

#[test]
fn invalid_month_fails() {
    preview()
        .args([
            "--rule",
            r#"{"frequency":"daily"}"#,
            "--start",
            "2024-01-01",
            "--year",
            "2024",
            "--month",
            "13",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid calendar month: 2024-13"));
}
