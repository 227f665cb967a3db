//! End-to-end tests driving the contam-rank binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn fasta_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".fa").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn reference_file() -> NamedTempFile {
    fasta_file(">ref\nACGTACGTTT\n")
}

fn batch_file() -> NamedTempFile {
    // Scores at threshold 3: record 1 -> 1, record 2 -> 3, record 3 -> 0.
    fasta_file(">1\nACGTAA\n>2\nTTTTT\n>3\nGGGGG\n")
}

#[test]
fn test_rank_text_output_orders_by_score() {
    let reference = reference_file();
    let batch = batch_file();

    let output = Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-k", "2", "-l", "3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let best = stdout.find("2  score=3").expect("record 2 ranked");
    let second = stdout.find("1  score=1").expect("record 1 ranked");
    assert!(best < second, "highest score must come first:\n{stdout}");
    assert!(!stdout.contains("score=0"), "record 3 must not appear");
}

#[test]
fn test_rank_sorted_ids_output() {
    let reference = reference_file();
    let batch = batch_file();

    Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-k", "2", "-l", "3", "--sorted-ids"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1, 2"));
}

#[test]
fn test_rank_json_output() {
    let reference = reference_file();
    let batch = batch_file();

    let output = Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-k", "3", "-l", "3", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["reference"], "ref");
    assert_eq!(parsed["threshold"], 3);
    assert_eq!(parsed["contaminants"], 3);
    assert_eq!(parsed["top"][0]["id"], "2");
    assert_eq!(parsed["top"][0]["score"], 3);
}

#[test]
fn test_rank_tsv_output() {
    let reference = reference_file();
    let batch = batch_file();

    Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-k", "1", "-l", "3", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rank\tid\tscore\tbases"))
        .stdout(predicate::str::contains("1\t2\t3\t5"));
}

#[test]
fn test_zero_threshold_is_rejected() {
    let reference = reference_file();
    let batch = batch_file();

    Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-l", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn test_missing_input_fails() {
    let reference = reference_file();

    Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg("/nonexistent/batch.fa")
        .assert()
        .failure();
}

#[test]
fn test_empty_batch_fails() {
    let reference = reference_file();
    let batch = fasta_file("");

    Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequences"));
}

#[test]
fn test_threshold_above_all_lengths_scores_zero() {
    let reference = reference_file();
    let batch = batch_file();

    let output = Command::cargo_bin("contam-rank")
        .unwrap()
        .args(["rank"])
        .arg(reference.path())
        .arg(batch.path())
        .args(["-k", "3", "-l", "50", "--format", "tsv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    for line in stdout.lines().skip(1) {
        let score = line.split('\t').nth(2).unwrap();
        assert_eq!(score, "0", "line: {line}");
    }
}
