#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Nothing listens here, so record fetches fail fast and exercise the fallback.
pub const DEAD_SOURCE: &str = "http://127.0.0.1:9/api/videos.json";

/// A temporary showreel site with sample video posts for testing.
pub struct TestSite {
    pub dir: TempDir,
}

impl TestSite {
    /// Create an empty site directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.dir.path().join("src/content/videos")
    }

    /// Write a file relative to the site root, creating parent dirs as needed.
    pub fn write_file(&self, relative_path: &str, content: &str) {
        let full = self.dir.path().join(relative_path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&full, content).expect("failed to write file");
    }

    /// Write one video post under the default content directory.
    pub fn write_video(&self, slug: &str, title: &str, author: &str, category: &str, tags: &[&str]) {
        let tags = tags
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_file(
            &format!("src/content/videos/{slug}.md"),
            &format!(
                r#"---
title: "{title}"
author: "{author}"
thumbnail: "/placeholder.svg"
videoFileName: "{slug}.mp4"
category: "{category}"
tags: [{tags}]
featured: false
publishDate: 2024-03-01
description: "A reel by {author}"
---

# {title}
"#
            ),
        );
    }

    /// Write a small collection used across the CLI tests.
    pub fn write_video_fixtures(&self) {
        self.write_video(
            "neon-dreams",
            "Neon Dreams",
            "Jane Doe",
            "Motion Graphics",
            &["Synthwave", "Retro"],
        );
        self.write_video(
            "paper-birds",
            "Paper Birds",
            "Omar Haddad",
            "Character Animation",
            &["Stop Motion"],
        );
        self.write_video(
            "liquid-logo",
            "Liquid Logo",
            "Ada Park",
            "Logo Animation",
            &["Simulation"],
        );
    }

    /// Path to the built binary
    pub fn showreel_bin() -> PathBuf {
        // assert_cmd finds the binary automatically via cargo
        PathBuf::from(env!("CARGO_BIN_EXE_showreel"))
    }

    /// Command with colors disabled so output can be matched as plain text
    pub fn command() -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(Self::showreel_bin());
        cmd.env("NO_COLOR", "1");
        cmd
    }
}

/// Create an initialized site with fixtures.
pub fn init_site() -> TestSite {
    let site = TestSite::new();
    site.write_video_fixtures();

    TestSite::command()
        .arg("init")
        .arg(site.path())
        .assert()
        .success();

    site
}
