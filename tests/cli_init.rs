mod common;

use common::TestSite;
use predicates::prelude::*;

#[test]
fn init_creates_showreel_directory() {
    let site = TestSite::new();

    TestSite::command()
        .arg("init")
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Showreel initialized"));

    assert!(site.path().join(".showreel/config.toml").exists());
    assert!(site.videos_dir().is_dir());
}

#[test]
fn init_json_output() {
    let site = TestSite::new();

    TestSite::command()
        .args(["--json", "init"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"initialized\""));
}

#[test]
fn init_twice_fails_without_force() {
    let site = TestSite::new();

    TestSite::command()
        .arg("init")
        .arg(site.path())
        .assert()
        .success();

    TestSite::command()
        .arg("init")
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_force_rewrites_config() {
    let site = TestSite::new();

    TestSite::command()
        .arg("init")
        .arg(site.path())
        .assert()
        .success();

    site.write_file(".showreel/config.toml", "[server]\nport = 9999\n");

    TestSite::command()
        .args(["init", "--force"])
        .arg(site.path())
        .assert()
        .success();

    let config = std::fs::read_to_string(site.path().join(".showreel/config.toml")).unwrap();
    assert!(config.contains("port = 4321"), "{config}");
}

#[test]
fn init_invalid_path_fails() {
    TestSite::command()
        .args(["init", "/nonexistent/showreel/site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid path"));
}
