//! End-to-end tests driving the compiled binary.
//!
//! Covers the full pipeline: git history → report, work log appends,
//! and triage over piped JSONL.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn hourglass_binary() -> String {
    env!("CARGO_BIN_EXE_hourglass").to_string()
}

fn git(repo: &Path, args: &[&str], envs: &[(&str, &str)]) {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(repo)
        .args(["-c", "user.name=Alice", "-c", "user.email=alice@example.com"])
        .args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit_at(repo: &Path, message: &str, timestamp: &str) {
    git(
        repo,
        &["commit", "--allow-empty", "-m", message],
        &[
            ("GIT_AUTHOR_DATE", timestamp),
            ("GIT_COMMITTER_DATE", timestamp),
        ],
    );
}

/// Temp repo with two commits 30 minutes apart.
fn seeded_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    git(temp.path(), &["init"], &[]);
    commit_at(temp.path(), "first", "2025-01-15T09:00:00+00:00");
    commit_at(temp.path(), "second", "2025-01-15T09:30:00+00:00");
    temp
}

#[test]
fn test_report_on_real_repository() {
    let repo = seeded_repo();

    let output = Command::new(hourglass_binary())
        .arg("report")
        .arg("--repo")
        .arg(repo.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("📊 Git Time Analysis Report"), "{stdout}");
    assert!(stdout.contains("📈 Total Estimated Work Hours: 0.5"), "{stdout}");
    assert!(stdout.contains("📅 Work Sessions: 1"), "{stdout}");
    assert!(stdout.contains("💻 Total Commits: 2"), "{stdout}");
}

#[test]
fn test_report_detailed_shows_sessions() {
    let repo = seeded_repo();

    let output = Command::new(hourglass_binary())
        .arg("report")
        .arg("--repo")
        .arg(repo.path())
        .arg("--detailed")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("📊 Daily Breakdown:"), "{stdout}");
    assert!(stdout.contains("2025-01-15: 0.5 hours"), "{stdout}");
    assert!(
        stdout.contains("1. 2025-01-15 09:00 - 09:30 (0.5h) - 2 commits"),
        "{stdout}"
    );
}

#[test]
fn test_report_empty_repository() {
    let temp = TempDir::new().unwrap();
    git(temp.path(), &["init"], &[]);

    let output = Command::new(hourglass_binary())
        .arg("report")
        .arg("--repo")
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "empty history should not be an error: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No commits found."), "{stdout}");
}

#[test]
fn test_report_json_round_trips() {
    let repo = seeded_repo();

    let output = Command::new(hourglass_binary())
        .arg("report")
        .arg("--repo")
        .arg(repo.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["commit_count"], 2);
    assert_eq!(value["session_count"], 1);
    assert!((value["total_hours"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn test_report_author_filter_excludes_others() {
    let repo = seeded_repo();

    let output = Command::new(hourglass_binary())
        .arg("report")
        .arg("--repo")
        .arg(repo.path())
        .arg("--author")
        .arg("Nobody")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No commits found."), "{stdout}");
}

#[test]
fn test_log_appends_to_configured_file() {
    let temp = TempDir::new().unwrap();
    let work_log = temp.path().join("work-log.txt");
    let config_file = temp.path().join("config.toml");
    std::fs::write(
        &config_file,
        format!("[dashboard]\nwork_log = \"{}\"\n", work_log.display()),
    )
    .unwrap();

    for note in ["wrote tests", "reviewed docs"] {
        let output = Command::new(hourglass_binary())
            .arg("--config")
            .arg(&config_file)
            .arg("log")
            .arg(note)
            .arg("--hours")
            .arg("1.5")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "log should succeed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let contents = std::fs::read_to_string(&work_log).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("[1.5h]  wrote tests"), "{contents}");
    assert!(contents.contains("[1.5h]  reviewed docs"), "{contents}");
}

#[test]
fn test_dashboard_combines_sections() {
    let repo = seeded_repo();
    let work_log = repo.path().join("work-log.txt");
    let config_file = repo.path().join("config.toml");
    std::fs::write(
        &config_file,
        format!("[dashboard]\nwork_log = \"{}\"\n", work_log.display()),
    )
    .unwrap();

    let output = Command::new(hourglass_binary())
        .arg("--config")
        .arg(&config_file)
        .arg("dashboard")
        .arg("--repo")
        .arg(repo.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "dashboard should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("🕐 Project Time Tracking Dashboard"), "{stdout}");
    assert!(stdout.contains("📈 Total Estimated Work Hours: 0.5"), "{stdout}");
    assert!(stdout.contains("💡 Start tracking with: hourglass log"), "{stdout}");
    assert!(stdout.contains("📁 Recent File Activity"), "{stdout}");
}

#[test]
fn test_triage_over_stdin() {
    let input = concat!(
        r#"{"uid":"1","subject":"URGENT: pay invoice","from":"billing@example.com","date":"2025-01-15T08:00:00Z","body":"Please settle the invoice today.","is_read":false}"#,
        "\n",
        "not json\n",
        r#"{"uid":"2","subject":"Lunch?","from":"sam@example.com","date":"2025-01-15T09:00:00Z","body":"Want to grab lunch with a friend?"}"#,
        "\n",
    );

    let mut child = Command::new(hourglass_binary())
        .arg("triage")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "triage should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("📬 Email Triage Summary"), "{stdout}");
    assert!(stdout.contains("📧 2 emails (1 unread)"), "{stdout}");
    assert!(stdout.contains("URGENT: pay invoice"), "{stdout}");
}

#[test]
fn test_triage_json_from_file() {
    let temp = TempDir::new().unwrap();
    let input_file = temp.path().join("messages.jsonl");
    std::fs::write(
        &input_file,
        concat!(
            r#"{"uid":"1","subject":"Team meeting","from":"alice@example.com","date":"2025-01-15T08:00:00Z","body":"Agenda for the project review."}"#,
            "\n",
        ),
    )
    .unwrap();

    let output = Command::new(hourglass_binary())
        .arg("triage")
        .arg(&input_file)
        .arg("--json")
        .arg("--categories")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "triage should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_emails"], 1);
    assert_eq!(value["categories"][0]["category"], "work");
}
