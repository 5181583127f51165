mod common;

use common::{init_site, TestSite};
use predicates::prelude::*;

const SUBMISSION: &str = r#"{
  "title": "Kinetic Type Study",
  "author": "Ada Park",
  "videoFileName": "kinetic-type-study.mp4",
  "category": "Typography",
  "publishDate": "2024-09-15",
  "description": "Letters in motion",
  "tags": ["Type"],
  "techniques": ["kinetic-typography"],
  "highlights": "Variable fonts\nHand-keyed easing"
}"#;

#[test]
fn create_writes_post() {
    let site = init_site();
    site.write_file("submission.json", SUBMISSION);

    TestSite::command()
        .arg("create")
        .arg(site.path())
        .arg("--from")
        .arg(site.path().join("submission.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Video post created successfully!"))
        .stdout(predicate::str::contains("/videos/kinetic-type-study"));

    let post = std::fs::read_to_string(site.videos_dir().join("kinetic-type-study.md")).unwrap();
    assert!(post.contains("techniques: [\"kinetic-typography\"]"));
    assert!(post.contains("- **Hand-keyed easing**"));

    // The new post is part of the collection straight away
    TestSite::command()
        .args(["--json", "status"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_videos\": 4"));
}

#[test]
fn create_missing_field_fails() {
    let site = init_site();
    site.write_file("submission.json", r#"{"title": "Only a title"}"#);

    TestSite::command()
        .arg("create")
        .arg(site.path())
        .arg("--from")
        .arg(site.path().join("submission.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("author is required"));
}

#[test]
fn create_dry_run_prints_markdown() {
    let site = init_site();

    TestSite::command()
        .arg("create")
        .arg(site.path())
        .args(["--from", "-", "--dry-run"])
        .write_stdin(SUBMISSION)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\ntitle: \"Kinetic Type Study\""))
        .stdout(predicate::str::contains("This project showcases letters in motion"));

    assert!(!site.videos_dir().join("kinetic-type-study.md").exists());
}

#[test]
fn create_json_output() {
    let site = init_site();
    site.write_file("submission.json", SUBMISSION);

    TestSite::command()
        .args(["--json", "create"])
        .arg(site.path())
        .arg("--from")
        .arg(site.path().join("submission.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filename\": \"kinetic-type-study.md\""));
}

#[test]
fn create_rejects_post_the_collection_cannot_load() {
    let site = init_site();
    site.write_file(
        "submission.json",
        &SUBMISSION.replace("kinetic-type-study.mp4", "kinetic-type-study.mkv"),
    );

    TestSite::command()
        .arg("create")
        .arg(site.path())
        .arg("--from")
        .arg(site.path().join("submission.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid extension"));

    assert!(!site.videos_dir().join("kinetic-type-study.md").exists());
    TestSite::command()
        .arg("list")
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 videos"));
}
