//! Video CDN URL generation.
//!
//! Posts only store a file name; every playable URL is derived from it and
//! the `[cdn]` configuration.

use serde::{Deserialize, Serialize};

use crate::config::CdnConfig;

/// Quality variants uploaded to the CDN
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Quality {
    #[serde(rename = "4k")]
    #[value(name = "4k")]
    Uhd,
    #[default]
    #[serde(rename = "1080p")]
    #[value(name = "1080p")]
    FullHd,
    #[serde(rename = "720p")]
    #[value(name = "720p")]
    Hd,
    #[serde(rename = "preview")]
    #[value(name = "preview")]
    Preview,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Uhd => "4k",
            Quality::FullHd => "1080p",
            Quality::Hd => "720p",
            Quality::Preview => "preview",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container formats, in fallback preference order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    #[default]
    Mp4,
    Webm,
    Mov,
    Avi,
}

impl VideoFormat {
    pub const SUPPORTED: [VideoFormat; 4] = [
        VideoFormat::Mp4,
        VideoFormat::Webm,
        VideoFormat::Mov,
        VideoFormat::Avi,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Webm => "webm",
            VideoFormat::Mov => "mov",
            VideoFormat::Avi => "avi",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "video/mp4",
            VideoFormat::Webm => "video/webm",
            VideoFormat::Mov => "video/quicktime",
            VideoFormat::Avi => "video/avi",
        }
    }

    /// Format for a file name's extension, case-insensitive
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        Self::SUPPORTED.into_iter().find(|f| f.extension() == ext)
    }
}

/// One `<source>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub src: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Every URL a player needs for one post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUrls {
    pub video_url: String,
    pub preview_url: String,
    pub video_sources: Vec<VideoSource>,
    /// Cache-Control the CDN serves video objects with
    pub cache_control: String,
}

/// Strip the last extension, if any: `reel.final.mp4` -> `reel.final`
fn base_name(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !ext.is_empty() && !ext.contains('/') => base,
        _ => file_name,
    }
}

/// Full CDN URL for a video file.
///
/// 1080p is the unsuffixed default; other qualities get a `-<quality>` suffix.
pub fn video_url(
    cdn: &CdnConfig,
    file_name: &str,
    quality: Option<Quality>,
    format: Option<VideoFormat>,
) -> String {
    let mut name = base_name(file_name).to_string();
    if let Some(q) = quality.filter(|q| *q != Quality::FullHd) {
        name.push('-');
        name.push_str(q.as_str());
    }
    name.push('.');
    name.push_str(format.unwrap_or_default().extension());

    format!(
        "{}{}/{}",
        cdn.base_url.trim_end_matches('/'),
        cdn.video_path,
        name
    )
}

/// One source per supported format, in preference order
pub fn video_sources(cdn: &CdnConfig, file_name: &str, quality: Quality) -> Vec<VideoSource> {
    VideoFormat::SUPPORTED
        .into_iter()
        .map(|format| VideoSource {
            src: video_url(cdn, file_name, Some(quality), Some(format)),
            mime_type: format.mime_type().to_string(),
        })
        .collect()
}

/// Low quality mp4 used for hover previews
pub fn preview_url(cdn: &CdnConfig, file_name: &str) -> String {
    video_url(cdn, file_name, Some(Quality::Preview), Some(VideoFormat::Mp4))
}

pub fn media_urls(cdn: &CdnConfig, file_name: &str, quality: Quality) -> MediaUrls {
    MediaUrls {
        video_url: video_url(cdn, file_name, Some(quality), None),
        preview_url: preview_url(cdn, file_name),
        video_sources: video_sources(cdn, file_name, quality),
        cache_control: cdn.cache_control.clone(),
    }
}

/// HEAD the URL; any transport error counts as unreachable.
pub async fn verify_url(http: &reqwest::Client, url: &str) -> bool {
    match http.head(url).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            tracing::warn!("Failed to verify video URL: {} ({})", url, e);
            false
        }
    }
}

/// Preferred quality if reachable, else 1080p if reachable, else the plain URL
pub async fn best_video_url(
    http: &reqwest::Client,
    cdn: &CdnConfig,
    file_name: &str,
    quality: Quality,
) -> String {
    let preferred = video_url(cdn, file_name, Some(quality), None);
    if verify_url(http, &preferred).await {
        return preferred;
    }

    if quality != Quality::FullHd {
        let fallback = video_url(cdn, file_name, Some(Quality::FullHd), None);
        if verify_url(http, &fallback).await {
            return fallback;
        }
    }

    video_url(cdn, file_name, None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cdn() -> CdnConfig {
        CdnConfig::default()
    }

    #[test]
    fn test_video_url_default_quality_has_no_suffix() {
        assert_eq!(
            video_url(&cdn(), "neon-dreams.mov", None, None),
            "https://video.showreel.design/videos/neon-dreams.mp4"
        );
        assert_eq!(
            video_url(&cdn(), "neon-dreams", Some(Quality::FullHd), None),
            "https://video.showreel.design/videos/neon-dreams.mp4"
        );
    }

    #[test]
    fn test_video_url_quality_and_format() {
        assert_eq!(
            video_url(&cdn(), "neon-dreams.mp4", Some(Quality::Uhd), Some(VideoFormat::Webm)),
            "https://video.showreel.design/videos/neon-dreams-4k.webm"
        );
    }

    #[test]
    fn test_video_url_only_strips_last_extension() {
        assert_eq!(
            video_url(&cdn(), "reel.v2.mp4", None, None),
            "https://video.showreel.design/videos/reel.v2.mp4"
        );
    }

    #[test]
    fn test_video_sources_cover_all_formats() {
        let sources = video_sources(&cdn(), "reel.mp4", Quality::Hd);
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].src, "https://video.showreel.design/videos/reel-720p.mp4");
        assert_eq!(sources[2].mime_type, "video/quicktime");
        assert_eq!(sources[3].mime_type, "video/avi");
    }

    #[test]
    fn test_preview_url() {
        assert_eq!(
            preview_url(&cdn(), "reel.webm"),
            "https://video.showreel.design/videos/reel-preview.mp4"
        );
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(VideoFormat::from_file_name("a.MOV"), Some(VideoFormat::Mov));
        assert_eq!(VideoFormat::from_file_name("a.mkv"), None);
        assert_eq!(VideoFormat::from_file_name("noext"), None);
    }

    #[test]
    fn test_quality_serde_names() {
        let q: Quality = serde_json::from_str("\"4k\"").unwrap();
        assert_eq!(q, Quality::Uhd);
        assert_eq!(serde_json::to_string(&Quality::Preview).unwrap(), "\"preview\"");
    }

    #[tokio::test]
    async fn test_best_video_url_unreachable_falls_back_to_plain() {
        let cdn = CdnConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..CdnConfig::default()
        };
        let http = reqwest::Client::new();
        let url = best_video_url(&http, &cdn, "reel.mp4", Quality::Uhd).await;
        assert_eq!(url, "http://127.0.0.1:9/videos/reel.mp4");
    }
}
