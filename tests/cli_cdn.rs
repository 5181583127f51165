mod common;

use common::TestSite;
use predicates::prelude::*;

#[test]
fn cdn_prints_default_urls() {
    let site = TestSite::new();

    TestSite::command()
        .args(["cdn", "neon-dreams.mov"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://video.showreel.design/videos/neon-dreams.mp4",
        ))
        .stdout(predicate::str::contains(
            "https://video.showreel.design/videos/neon-dreams-preview.mp4",
        ))
        .stdout(predicate::str::contains("video/quicktime"));
}

#[test]
fn cdn_quality_suffix_and_json() {
    let site = TestSite::new();

    let output = TestSite::command()
        .args(["--json", "cdn", "neon-dreams.mp4", "--quality", "4k"])
        .arg(site.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["quality"], "4k");
    assert_eq!(
        json["videoUrl"],
        "https://video.showreel.design/videos/neon-dreams-4k.mp4"
    );
    assert_eq!(json["videoSources"].as_array().unwrap().len(), 4);
}

#[test]
fn cdn_uses_configured_base_url() {
    let site = TestSite::new();
    site.write_file(
        ".showreel/config.toml",
        "[cdn]\nbase_url = \"https://cdn.example.test/\"\n",
    );

    TestSite::command()
        .args(["cdn", "reel.webm", "--quality", "720p"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("https://cdn.example.test/videos/reel-720p.mp4"));
}

#[test]
fn cdn_rejects_unknown_quality() {
    TestSite::command()
        .args(["cdn", "reel.mp4", "--quality", "8k"])
        .assert()
        .failure();
}

#[test]
fn cdn_reports_configured_cache_control() {
    let site = TestSite::new();
    site.write_file(
        ".showreel/config.toml",
        "[cdn]\nbase_url = \"https://cdn.example.com\"\ncache_control = \"no-cache\"\n",
    );

    let output = TestSite::command()
        .args(["--json", "cdn", "reel.mp4"])
        .arg(site.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cacheControl"], "no-cache");
    assert_eq!(json["videoUrl"], "https://cdn.example.com/videos/reel.mp4");
}
