//! Two-tier loading of the suggestion record set.
//!
//! The record source (normally `/api/videos.json`) is tried once. Any failure
//! is logged and recovered by scraping the cards of the current page. Nothing
//! here ever returns an error to the caller.

use thiserror::Error;

use super::index::SearchIndex;
use crate::types::{Card, Record};

/// Why the record source could not be used
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record source answered HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed record payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Something that can hand over the flat record list in one go.
pub trait RecordSource {
    async fn fetch_records(&self) -> Result<Vec<Record>, SourceError>;
}

/// The cards currently rendered on the page, used when the source fails.
pub trait PageCards {
    fn cards(&self) -> Vec<Card>;
}

impl PageCards for Vec<Card> {
    fn cards(&self) -> Vec<Card> {
        self.clone()
    }
}

/// Load records from `source`, falling back to `page` on any failure.
pub async fn load_records(source: &impl RecordSource, page: &impl PageCards) -> Vec<Record> {
    match source.fetch_records().await {
        Ok(records) => {
            tracing::debug!("Loaded {} records from source", records.len());
            records
        }
        Err(e) => {
            tracing::warn!("Could not load videos for search: {}", e);
            let records = records_from_cards(&page.cards());
            tracing::debug!("Extracted {} records from page cards", records.len());
            records
        }
    }
}

/// Load and build the index in one step.
pub async fn load_index(source: &impl RecordSource, page: &impl PageCards) -> SearchIndex {
    SearchIndex::new(load_records(source, page).await)
}

/// Turn page cards into records, skipping cards without a title.
pub fn records_from_cards(cards: &[Card]) -> Vec<Record> {
    cards
        .iter()
        .filter_map(|card| {
            let title = card.title_text();
            if title.is_empty() {
                return None;
            }
            let href = card.href.clone().unwrap_or_default();
            Some(Record {
                title: title.to_string(),
                author: card.author_text().to_string(),
                category: card.category_text().to_string(),
                description: None,
                tags: None,
                slug: last_path_segment(&href).to_string(),
                url: Some(href),
            })
        })
        .collect()
}

fn last_path_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or_default()
}
