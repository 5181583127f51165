use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::slug::generate_slug;
use super::taxonomy::Taxonomy;
use super::{ContentError, Result};
use crate::cdn::{self, MediaUrls, Quality, VideoFormat};
use crate::config::CdnConfig;
use crate::search::PageCards;
use crate::types::{Card, CategoryStats, CollectionStats, Record};

/// Frontmatter of one video post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPost {
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub video_file_name: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub publish_date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub sound_music: Vec<String>,
}

impl VideoPost {
    /// Check the constraints the YAML types alone cannot express.
    fn validate(&self) -> std::result::Result<(), String> {
        if VideoFormat::from_file_name(&self.video_file_name).is_none() {
            return Err(
                "Video file must have a valid extension (.mp4, .webm, .mov, .avi)".to_string(),
            );
        }
        if let Some(year) = self.year {
            if !(2000..=2099).contains(&year) {
                return Err(format!("year must be between 2000 and 2099, got {year}"));
            }
        }
        if let Some(ref url) = self.source_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("sourceUrl must be an http(s) URL, got {url}"));
            }
        }
        for taxonomy in Taxonomy::ALL {
            for value in self.taxonomy(taxonomy) {
                if !taxonomy.contains(value) {
                    return Err(format!("unknown {} value: {value}", taxonomy.key()));
                }
            }
        }
        Ok(())
    }

    pub fn taxonomy(&self, taxonomy: Taxonomy) -> &[String] {
        match taxonomy {
            Taxonomy::Industries => &self.industries,
            Taxonomy::Styles => &self.styles,
            Taxonomy::Techniques => &self.techniques,
            Taxonomy::SoundMusic => &self.sound_music,
        }
    }
}

/// A post together with its slug and markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    pub slug: String,
    #[serde(flatten)]
    pub post: VideoPost,
    #[serde(skip)]
    pub body: String,
}

impl VideoEntry {
    /// Parse a markdown file's content
    pub fn parse(slug: &str, content: &str, path: &Path) -> Result<Self> {
        let (yaml, body) = split_frontmatter(content)
            .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

        let post: VideoPost = serde_yaml::from_str(yaml).map_err(|source| ContentError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        post.validate().map_err(|reason| ContentError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(Self {
            slug: slug.to_string(),
            post,
            body: body.trim_start_matches(['\r', '\n']).to_string(),
        })
    }

    pub fn href(&self) -> String {
        format!("/videos/{}", self.slug)
    }

    pub fn media(&self, cdn: &CdnConfig) -> MediaUrls {
        cdn::media_urls(cdn, &self.post.video_file_name, self.post.quality)
    }

    pub fn to_record(&self) -> Record {
        Record {
            title: self.post.title.clone(),
            author: self.post.author.clone(),
            category: self.post.category.clone(),
            description: Some(self.post.description.clone()),
            tags: Some(self.post.tags.clone()),
            slug: self.slug.clone(),
            url: None,
        }
    }

    /// The card a listing page renders for this entry
    pub fn to_card(&self) -> Card {
        Card {
            title: Some(self.post.title.clone()),
            author: Some(self.post.author.clone()),
            data_author: Some(self.post.author.clone()),
            category: Some(self.post.category.clone()),
            data_category: Some(self.post.category.clone()),
            href: Some(self.href()),
        }
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// All posts of a content directory, in file-name order
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<VideoEntry>,
}

impl Collection {
    /// Load every `*.md` file under `dir`. A missing directory is an empty collection.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        if !dir.exists() {
            return Ok(Self { entries });
        }

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "md") {
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let slug = slug_for(dir, path);
            entries.push(VideoEntry::parse(&slug, &content, path)?);
        }

        tracing::debug!("Loaded {} videos from {}", entries.len(), dir.display());
        Ok(Self { entries })
    }

    pub fn all(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn by_slug(&self, slug: &str) -> Option<&VideoEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    pub fn by_category(&self, category: &str) -> Vec<&VideoEntry> {
        self.filter(|p| p.category == category)
    }

    pub fn by_category_slug(&self, category_slug: &str) -> Vec<&VideoEntry> {
        self.filter(|p| generate_slug(&p.category) == category_slug)
    }

    pub fn featured(&self) -> Vec<&VideoEntry> {
        self.filter(|p| p.featured)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&VideoEntry> {
        self.filter(|p| p.tags.iter().any(|t| t == tag))
    }

    pub fn by_tag_slug(&self, tag_slug: &str) -> Vec<&VideoEntry> {
        self.filter(|p| p.tags.iter().any(|t| generate_slug(t) == tag_slug))
    }

    pub fn by_author(&self, author: &str) -> Vec<&VideoEntry> {
        self.filter(|p| p.author == author)
    }

    pub fn by_author_slug(&self, author_slug: &str) -> Vec<&VideoEntry> {
        self.filter(|p| generate_slug(&p.author) == author_slug)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        unique(self.entries.iter().map(|e| e.post.category.as_str()))
    }

    /// Distinct tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        unique(
            self.entries
                .iter()
                .flat_map(|e| e.post.tags.iter().map(String::as_str)),
        )
    }

    /// Distinct authors in first-seen order
    pub fn authors(&self) -> Vec<&str> {
        unique(self.entries.iter().map(|e| e.post.author.as_str()))
    }

    /// Same category, excluding `current_slug`, newest first
    pub fn related(&self, current_slug: &str, category: &str, limit: usize) -> Vec<&VideoEntry> {
        let mut related: Vec<_> = self
            .by_category(category)
            .into_iter()
            .filter(|e| e.slug != current_slug)
            .collect();
        sort_by_date(&mut related);
        related.truncate(limit);
        related
    }

    /// Records served to the suggestion box
    pub fn to_records(&self) -> Vec<Record> {
        self.entries.iter().map(VideoEntry::to_record).collect()
    }

    pub fn stats(&self) -> CollectionStats {
        let categories = self
            .categories()
            .into_iter()
            .map(|category| CategoryStats {
                category: category.to_string(),
                video_count: self.by_category(category).len() as u64,
            })
            .collect();

        CollectionStats {
            total_videos: self.entries.len() as u64,
            featured: self.featured().len() as u64,
            categories,
            tags: self.tags().len() as u64,
            authors: self.authors().len() as u64,
            latest_publish_date: self
                .entries
                .iter()
                .map(|e| e.post.publish_date)
                .max()
                .map(|d| d.to_string()),
        }
    }

    fn filter(&self, pred: impl Fn(&VideoPost) -> bool) -> Vec<&VideoEntry> {
        self.entries.iter().filter(|e| pred(&e.post)).collect()
    }
}

impl PageCards for Collection {
    fn cards(&self) -> Vec<Card> {
        self.entries.iter().map(VideoEntry::to_card).collect()
    }
}

/// Newest first; entries sharing a date keep their order
pub fn sort_by_date(entries: &mut [&VideoEntry]) {
    entries.sort_by(|a, b| b.post.publish_date.cmp(&a.post.publish_date));
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

fn slug_for(dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
