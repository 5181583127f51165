use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for a showreel site
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub cdn: CdnConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Where the site lives and where its content is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Content collection directory, relative to the site root
    pub content_dir: String,
    /// Public origin of the site, used to build absolute links
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "src/content/videos".into(),
            base_url: "http://localhost:4321".into(),
        }
    }
}

/// Video CDN (R2 bucket behind a custom domain)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Base domain for videos
    pub base_url: String,
    /// Directory path under the base domain
    pub video_path: String,
    /// Cache-Control value the CDN is expected to send for video objects
    pub cache_control: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: "https://video.showreel.design".into(),
            video_path: "/videos".into(),
            cache_control: "public, max-age=31536000".into(),
        }
    }
}

/// Configuration for the suggestion box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Record source URL. Defaults to `<site.base_url>/api/videos.json`.
    pub source_url: Option<String>,
    /// Quiet period after the last keystroke before a query runs
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters, after trimming) close the panel
    pub min_query_len: usize,
    /// Maximum number of suggestions shown
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source_url: None,
            debounce_ms: 300,
            min_query_len: 2,
            max_suggestions: 8,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Configuration for `showreel serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Default HTTP port
    pub port: u16,
    /// `max-age` (seconds) advertised on `/api/videos.json`
    pub cache_max_age: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4321,
            cache_max_age: 300,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Load the site's configuration, or the defaults if the site was never initialized
    pub fn load_or_default(site_root: &Path) -> Result<Self> {
        let path = Self::config_path(site_root);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Get the path to the .showreel directory
    pub fn data_dir(site_root: &Path) -> PathBuf {
        site_root.join(".showreel")
    }

    /// Get the path to the config file
    pub fn config_path(site_root: &Path) -> PathBuf {
        Self::data_dir(site_root).join("config.toml")
    }

    /// Get the path to the content collection
    pub fn content_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.site.content_dir)
    }

    /// Resolve the record source URL
    pub fn source_url(&self) -> String {
        match self.search.source_url {
            Some(ref url) => url.clone(),
            None => format!("{}/api/videos.json", self.site.base_url.trim_end_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_settings() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.max_suggestions, 8);
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
[search]
debounce_ms = 150
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.max_suggestions, 8);
        assert_eq!(config.site.content_dir, "src/content/videos");
        assert_eq!(config.cdn.base_url, "https://video.showreel.design");
        assert_eq!(config.server.cache_max_age, 300);
    }

    #[test]
    fn test_source_url_derived_from_base_url() {
        let toml_str = r#"
[site]
base_url = "https://showreel.design/"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source_url(), "https://showreel.design/api/videos.json");
    }

    #[test]
    fn test_source_url_override() {
        let toml_str = r#"
[search]
source_url = "http://127.0.0.1:9000/records.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source_url(), "http://127.0.0.1:9000/records.json");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.server.port = 8080;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.cdn.video_path, "/videos");
    }

    #[test]
    fn test_load_or_default_without_init() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.server.port, 4321);
    }
}
