use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn sample_problem() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/problems/small.in")
}

fn printed_score(output: &[u8]) -> u64 {
    let text = String::from_utf8_lossy(output);
    text.lines()
        .find_map(|line| line.strip_prefix("score: "))
        .and_then(|value| value.trim().parse().ok())
        .expect("score line")
}

#[test]
fn plan_then_score_agree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let solution = dir.path().join("solution.txt");
    let summary = dir.path().join("summary.json");

    let planned = Command::cargo_bin("balloon_plan")
        .expect("balloon_plan bin")
        .args([
            "--input",
            sample_problem().to_str().unwrap(),
            "--output",
            solution.to_str().unwrap(),
            "--depth",
            "8",
            "--summary",
            summary.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("score: "))
        .get_output()
        .stdout
        .clone();

    let scored = Command::cargo_bin("balloon_score")
        .expect("balloon_score bin")
        .args([
            "--input",
            sample_problem().to_str().unwrap(),
            "--solution",
            solution.to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(printed_score(&planned), printed_score(&scored));

    let lines: Vec<String> = fs::read_to_string(&solution)
        .expect("solution text")
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 30);
    assert!(lines.iter().all(|l| l.split_whitespace().count() == 3));

    let summary = fs::read_to_string(summary).expect("summary json");
    assert!(summary.contains("\"strategy\": \"lookahead\""));
    assert!(summary.contains("\"lookahead_depth\": 8"));
}

#[test]
fn unknown_strategy_is_rejected() {
    Command::cargo_bin("balloon_plan")
        .expect("balloon_plan bin")
        .args([
            "--input",
            sample_problem().to_str().unwrap(),
            "--strategy",
            "teleport",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy"));
}

#[test]
fn malformed_problem_fails_loudly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("broken.in");
    fs::write(&input, "3 3 1\n1 1 1\n").expect("write input");
    Command::cargo_bin("balloon_plan")
        .expect("balloon_plan bin")
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            dir.path().join("out.txt").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input at line 2"));
}

#[test]
fn plot_renders_png_from_trajectory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let solution = dir.path().join("solution.txt");
    let csv_path = dir.path().join("tracks.csv");
    let png_path = dir.path().join("tracks.png");

    Command::cargo_bin("balloon_plan")
        .expect("balloon_plan bin")
        .args([
            "--input",
            sample_problem().to_str().unwrap(),
            "--output",
            solution.to_str().unwrap(),
            "--strategy",
            "greedy",
            "--trajectory",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv_text = fs::read_to_string(&csv_path).expect("trajectory csv");
    assert!(csv_text.starts_with("turn,balloon,col,row,altitude,live"));

    Command::cargo_bin("balloon_plot")
        .expect("balloon_plot bin")
        .args([
            "--input",
            sample_problem().to_str().unwrap(),
            "--trajectory",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "200",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}
