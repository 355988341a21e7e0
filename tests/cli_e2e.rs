use assert_cmd::Command;
use predicates::prelude::*;

fn veridoc(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("veridoc").unwrap();
    cmd.env("VERIDOC_DATA_DIR", data_dir);
    cmd
}

#[test]
fn test_list_seeds_demo_documents() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("doc-1"))
        .stdout(predicates::str::contains("PAN Card"))
        .stdout(predicates::str::contains("doc-2"))
        .stdout(predicates::str::contains("Aadhar Card"));

    // The seed is persisted, not regenerated.
    assert!(temp_dir.path().join("documents.json").exists());
}

#[test]
fn test_upload_then_list_and_view() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("voter_id.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

    veridoc(temp_dir.path())
        .args(["upload", "--type", "voter", "--document-id", "VOT-778"])
        .args(["--issue-date", "2021-02-10"])
        .arg(file.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("sent for verification"));

    veridoc(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Voter ID"))
        .stdout(predicates::str::contains("VOT-778"));

    // Search narrows the listing.
    veridoc(temp_dir.path())
        .args(["list", "--search", "voter"])
        .assert()
        .success()
        .stdout(predicates::str::contains("VOT-778"))
        .stdout(predicates::str::contains("PAN Card").not());
}

#[test]
fn test_upload_rejects_bad_issue_date() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("x.pdf");
    std::fs::write(&file, b"x").unwrap();

    veridoc(temp_dir.path())
        .args(["upload", "--type", "pan", "--document-id", "A"])
        .args(["--issue-date", "10/02/2021"])
        .arg(file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid issue date"));
}

#[test]
fn test_view_unknown_id_is_not_found_not_failure() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .args(["view", "doc-404"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Document not found: doc-404"));
}

#[test]
fn test_mark_transitions_status() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .args(["mark", "doc-2", "verified"])
        .assert()
        .success()
        .stdout(predicates::str::contains("doc-2 marked verified"));

    veridoc(temp_dir.path())
        .args(["view", "doc-2"])
        .assert()
        .success()
        .stdout(predicates::str::contains("verified"));
}

#[test]
fn test_history_filter_and_sort_flags() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicates::str::contains("entries"));

    veridoc(temp_dir.path())
        .args(["history", "--status", "verified", "--sort", "asc"])
        .assert()
        .success();

    veridoc(temp_dir.path())
        .args(["history", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unknown status"));
}

#[test]
fn test_whoami_without_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Not logged in."));
}

#[test]
fn test_config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();

    veridoc(temp_dir.path())
        .args(["config", "seed-demo-data", "false"])
        .assert()
        .success();

    veridoc(temp_dir.path())
        .args(["config", "seed-demo-data"])
        .assert()
        .success()
        .stdout(predicates::str::contains("seed-demo-data = false"));

    // With seeding off, a fresh data dir lists nothing.
    let empty_dir = temp_dir.path().join("empty");
    std::fs::create_dir_all(&empty_dir).unwrap();
    veridoc(&empty_dir)
        .args(["config", "seed-demo-data", "false"])
        .assert()
        .success();
    veridoc(&empty_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("No documents found."));
}
