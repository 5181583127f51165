use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::collection::VideoEntry;
use super::slug::generate_slug;
use super::{ContentError, Result};

/// Fields checked, in this order, before a post is written
pub const REQUIRED_FIELDS: [&str; 6] = [
    "title",
    "author",
    "videoFileName",
    "category",
    "publishDate",
    "description",
];

const TECHNICAL_DETAILS: &str = "The animations were created using industry-standard tools and techniques, ensuring high-quality output suitable for various media applications.";

/// Submission for a new video post.
///
/// Mirrors the JSON the upload form sends, so the optional values are
/// accepted loosely: `featured` may be a bool or `"true"`, `year` and
/// `duration` may be numbers or strings, and list fields that are not
/// arrays are treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewVideo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub video_file_name: Option<String>,
    pub category: Option<String>,
    pub publish_date: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    pub featured: Option<Value>,
    pub quality: Option<String>,
    /// Replaces the generated intro paragraph
    pub content: Option<String>,
    /// One highlight per line
    pub highlights: Option<String>,
    /// One application per line
    pub applications: Option<String>,
    pub year: Option<Value>,
    pub duration: Option<Value>,
    pub source_url: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub industries: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub styles: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub techniques: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub sound_music: Vec<String>,
}

/// Result of a successful write
#[derive(Debug, Clone, Serialize)]
pub struct WrittenPost {
    pub filename: String,
    pub slug: String,
    #[serde(skip)]
    pub path: PathBuf,
}

fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A value as the form would print it, or `None` when it is falsy
fn loose_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quoted_list(items: &[String]) -> String {
    let inner: Vec<_> = items.iter().map(|s| quoted(s)).collect();
    format!("[{}]", inner.join(", "))
}

fn bullet_lines(text: &str, fmt: impl Fn(&str) -> String) -> Option<String> {
    let lines: Vec<_> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(fmt)
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// `YYYY-MM-DD` from a plain date or an RFC 3339 timestamp (taken in UTC)
pub fn format_date(input: &str) -> Result<String> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .map_err(|_| ContentError::InvalidDate(input.to_string()))
}

impl NewVideo {
    fn field(&self, name: &str) -> Option<&String> {
        match name {
            "title" => self.title.as_ref(),
            "author" => self.author.as_ref(),
            "videoFileName" => self.video_file_name.as_ref(),
            "category" => self.category.as_ref(),
            "publishDate" => self.publish_date.as_ref(),
            "description" => self.description.as_ref(),
            _ => None,
        }
    }

    /// First missing or blank required field
    pub fn validate(&self) -> Result<()> {
        for name in REQUIRED_FIELDS {
            if present(self.field(name)).is_none() {
                return Err(ContentError::MissingField(name));
            }
        }
        Ok(())
    }

    fn is_featured(&self) -> bool {
        match self.featured {
            Some(Value::Bool(b)) => b,
            Some(Value::String(ref s)) => s == "true",
            _ => false,
        }
    }

    pub fn slug(&self) -> String {
        generate_slug(self.title.as_deref().unwrap_or_default())
    }

    /// Frontmatter plus generated body
    pub fn render_markdown(&self) -> Result<String> {
        self.validate()?;
        let text = |name: &str| self.field(name).map(String::as_str).unwrap_or_default();
        let title = text("title");
        let description = text("description");

        let mut fm = vec![
            "---".to_string(),
            format!("title: {}", quoted(title)),
            format!("author: {}", quoted(text("author"))),
            "thumbnail: \"/placeholder.svg\"".to_string(),
            format!("videoFileName: {}", quoted(text("videoFileName"))),
            format!("category: {}", quoted(text("category"))),
            format!("tags: {}", quoted_list(&self.tags)),
            format!("featured: {}", self.is_featured()),
            format!("publishDate: {}", format_date(text("publishDate"))?),
            format!("description: {}", quoted(description)),
            format!(
                "quality: {}",
                quoted(present(self.quality.as_ref()).unwrap_or("1080p"))
            ),
        ];
        if let Some(year) = loose_text(self.year.as_ref()) {
            fm.push(format!("year: {year}"));
        }
        if let Some(duration) = loose_text(self.duration.as_ref()) {
            fm.push(format!("duration: {duration}"));
        }
        if let Some(url) = present(self.source_url.as_ref()) {
            fm.push(format!("sourceUrl: {}", quoted(url)));
        }
        fm.push(format!("industries: {}", quoted_list(&self.industries)));
        fm.push(format!("styles: {}", quoted_list(&self.styles)));
        fm.push(format!("techniques: {}", quoted_list(&self.techniques)));
        fm.push(format!("soundMusic: {}", quoted_list(&self.sound_music)));
        fm.push("---".to_string());

        let mut body = match self.content.as_deref().filter(|c| !c.is_empty()) {
            Some(content) => content.to_string(),
            None => format!(
                "# {title}\n\nThis project showcases {}",
                description.to_lowercase()
            ),
        };

        if let Some(lines) = self
            .highlights
            .as_deref()
            .and_then(|h| bullet_lines(h, |l| format!("- **{l}**")))
        {
            body.push_str("\n\n## Project Highlights\n\n");
            body.push_str(&lines);
        }

        body.push_str("\n\n## Technical Details\n\n");
        body.push_str(TECHNICAL_DETAILS);

        if let Some(lines) = self
            .applications
            .as_deref()
            .and_then(|a| bullet_lines(a, |l| format!("- {l}")))
        {
            body.push_str("\n\n## Applications\n\nThese animations are perfect for:\n");
            body.push_str(&lines);
        }

        Ok(format!("{}\n\n{}", fm.join("\n"), body))
    }
}

/// Validate, render and write `<slug>.md` into `dir`, replacing any existing post
pub fn write_post(dir: &Path, video: &NewVideo) -> Result<WrittenPost> {
    video.validate()?;
    let slug = video.slug();
    if slug.is_empty() {
        return Err(ContentError::Invalid {
            path: dir.to_path_buf(),
            reason: "title must contain at least one letter or digit".to_string(),
        });
    }

    let markdown = video.render_markdown()?;
    let filename = format!("{slug}.md");
    let path = dir.join(&filename);

    // Anything the collection would refuse to load never reaches disk.
    VideoEntry::parse(&slug, &markdown, &path)?;

    std::fs::create_dir_all(dir).map_err(|source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, markdown).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Wrote video post {}", path.display());
    Ok(WrittenPost {
        filename,
        slug,
        path,
    })
}
