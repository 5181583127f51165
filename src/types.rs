use serde::{Deserialize, Serialize};

/// A single searchable video, as served by `/api/videos.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub slug: String,
    /// Precomputed navigation target (only set for records scraped from a page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record {
    /// Where activating this record navigates to.
    ///
    /// `/videos/<slug>` whenever a slug is known, otherwise the precomputed url.
    pub fn href(&self) -> String {
        if !self.slug.is_empty() {
            format!("/videos/{}", self.slug)
        } else {
            self.url.clone().unwrap_or_default()
        }
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self
                .tags
                .as_deref()
                .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(needle)))
    }
}

/// A video card as it appears on a listing page.
///
/// Every field is optional because cards come from markup that may be
/// incomplete; `data_*` fields mirror the `data-author` / `data-category`
/// attributes used when the visible text is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: Option<String>,
    pub author: Option<String>,
    pub data_author: Option<String>,
    pub category: Option<String>,
    pub data_category: Option<String>,
    /// Target of the card's anchor
    pub href: Option<String>,
}

impl Card {
    /// Visible title text, trimmed.
    pub fn title_text(&self) -> &str {
        self.title.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Author text, falling back to the `data-author` attribute.
    pub fn author_text(&self) -> &str {
        text_or_attr(self.author.as_deref(), self.data_author.as_deref())
    }

    /// Category text, falling back to the `data-category` attribute.
    pub fn category_text(&self) -> &str {
        text_or_attr(self.category.as_deref(), self.data_category.as_deref())
    }
}

fn text_or_attr<'a>(text: Option<&'a str>, attr: Option<&'a str>) -> &'a str {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => attr.unwrap_or_default(),
    }
}

/// Statistics about the content collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_videos: u64,
    pub featured: u64,
    pub categories: Vec<CategoryStats>,
    pub tags: u64,
    pub authors: u64,
    pub latest_publish_date: Option<String>,
}

/// Per-category statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub video_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neon() -> Record {
        Record {
            title: "Neon Dreams".into(),
            author: "Jane Doe".into(),
            category: "Motion Graphics".into(),
            description: Some("A glowing city at night".into()),
            tags: Some(vec!["Retro".into(), "Synthwave".into()]),
            slug: "neon-dreams".into(),
            url: None,
        }
    }

    #[test]
    fn test_record_matches_every_field() {
        let r = neon();
        assert!(r.matches("neon"));
        assert!(r.matches("jane"));
        assert!(r.matches("motion"));
        assert!(r.matches("glowing"));
        assert!(r.matches("synthwave"));
        assert!(!r.matches("orchestral"));
    }

    #[test]
    fn test_record_optional_fields_absent() {
        let r = Record {
            description: None,
            tags: None,
            ..neon()
        };
        assert!(!r.matches("glowing"));
        assert!(!r.matches("retro"));
    }

    #[test]
    fn test_record_href_prefers_slug() {
        let mut r = neon();
        r.url = Some("https://example.com/videos/other".into());
        assert_eq!(r.href(), "/videos/neon-dreams");

        r.slug.clear();
        assert_eq!(r.href(), "https://example.com/videos/other");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"title": "Only Title"}"#;
        let r: Record = serde_json::from_str(json).unwrap();
        assert_eq!(r.title, "Only Title");
        assert_eq!(r.author, "");
        assert!(r.tags.is_none());
        assert!(r.description.is_none());
    }

    #[test]
    fn test_serialize_skips_absent_url() {
        let json = serde_json::to_string(&neon()).unwrap();
        assert!(!json.contains("\"url\""));
        assert!(json.contains("\"slug\":\"neon-dreams\""));
    }

    #[test]
    fn test_card_text_falls_back_to_attributes() {
        let card = Card {
            title: Some("  Fallback Test \n".into()),
            author: Some("   ".into()),
            data_author: Some("Ada".into()),
            category: None,
            data_category: Some("VFX".into()),
            href: Some("/videos/fallback-test".into()),
        };
        assert_eq!(card.title_text(), "Fallback Test");
        assert_eq!(card.author_text(), "Ada");
        assert_eq!(card.category_text(), "VFX");
    }
}
