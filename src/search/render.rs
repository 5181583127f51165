//! Suggestion panel rendering.
//!
//! Every piece of record or query text is escaped before it reaches markup.
//! The only markup not derived from escaped text is the `<mark>` wrapper the
//! highlighter adds around matches.

use regex::Regex;
use serde::Serialize;

use crate::types::Record;

const MARK_OPEN: &str = r#"<mark class="bg-yellow-200">"#;
const MARK_CLOSE: &str = "</mark>";

/// Escape text for insertion into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Navigation target of the "view all results" item
pub fn search_href(query: &str) -> String {
    format!("/search?q={}", urlencoding::encode(query))
}

/// Case-insensitive matcher for one query, shared by the HTML and terminal renderers.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let pattern = if query.is_empty() {
            None
        } else {
            Regex::new(&format!("(?i){}", regex::escape(query))).ok()
        };
        Self { pattern }
    }

    /// Wrap every occurrence of the query in `<mark>`, escaping each segment.
    ///
    /// Matching runs on the raw text so a query never matches inside an
    /// entity the escaping introduced.
    pub fn to_html(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for (segment, matched) in self.segments(text) {
            if matched {
                html.push_str(MARK_OPEN);
                html.push_str(&escape_html(segment));
                html.push_str(MARK_CLOSE);
            } else {
                html.push_str(&escape_html(segment));
            }
        }
        html
    }

    /// Split raw `text` into `(segment, is_match)` runs.
    pub fn segments<'t>(&self, text: &'t str) -> Vec<(&'t str, bool)> {
        let Some(ref re) = self.pattern else {
            return vec![(text, false)];
        };
        let mut out = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                out.push((&text[last..m.start()], false));
            }
            out.push((m.as_str(), true));
            last = m.end();
        }
        if last < text.len() {
            out.push((&text[last..], false));
        }
        out
    }
}

/// One navigable entry of the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionItem {
    Video {
        title: String,
        author: String,
        category: String,
        href: String,
    },
    ViewAll {
        query: String,
        href: String,
    },
}

impl SuggestionItem {
    pub fn href(&self) -> &str {
        match self {
            SuggestionItem::Video { href, .. } | SuggestionItem::ViewAll { href, .. } => href,
        }
    }
}

/// The rendered suggestion list for one query.
///
/// `items` holds the navigable entries (matches followed by exactly one
/// view-all entry). The "no results" line is informational and not navigable.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionPanel {
    pub query: String,
    pub items: Vec<SuggestionItem>,
    pub no_results: bool,
    #[serde(skip)]
    highlighter: Highlighter,
}

impl SuggestionPanel {
    pub fn build(query: &str, results: &[Record]) -> Self {
        let mut items: Vec<SuggestionItem> = results
            .iter()
            .map(|r| SuggestionItem::Video {
                title: r.title.clone(),
                author: r.author.clone(),
                category: r.category.clone(),
                href: r.href(),
            })
            .collect();
        items.push(SuggestionItem::ViewAll {
            query: query.to_string(),
            href: search_href(query),
        });

        Self {
            query: query.to_string(),
            items,
            no_results: results.is_empty(),
            highlighter: Highlighter::new(query),
        }
    }

    /// Number of navigable items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&SuggestionItem> {
        self.items.get(index)
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Title markup with the query highlighted
    pub fn title_html(&self, title: &str) -> String {
        self.highlighter.to_html(title)
    }

    /// Full markup of the panel contents. `active` gets the focus class.
    pub fn to_html(&self, active: Option<usize>) -> String {
        let mut html = String::new();
        let query = escape_html(&self.query);

        if self.no_results {
            html.push_str(&format!(
                "<div class=\"suggestion-empty px-4 py-3 text-gray-500 text-sm\">No videos found for \"{query}\"</div>\n"
            ));
        }

        for (i, item) in self.items.iter().enumerate() {
            let focus = if active == Some(i) { " bg-gray-100" } else { "" };
            match item {
                SuggestionItem::Video {
                    title,
                    author,
                    category,
                    href,
                } => html.push_str(&format!(
                    "<a href=\"{href}\" class=\"suggestion-item block px-4 py-3{focus}\">\
<div class=\"font-medium text-gray-900 truncate\">{title}</div>\
<div class=\"text-sm text-gray-500 truncate\">by {author} \u{2022} {category}</div>\
</a>\n",
                    href = escape_html(href),
                    title = self.title_html(title),
                    author = escape_html(author),
                    category = escape_html(category),
                )),
                SuggestionItem::ViewAll { href, .. } => html.push_str(&format!(
                    "<a href=\"{href}\" class=\"suggestion-item suggestion-view-all block px-4 py-3{focus}\">\
<span class=\"text-sm font-medium text-gray-700\">View all results for \"{query}\"</span>\
</a>\n",
                    href = escape_html(href),
                )),
            }
        }

        html
    }
}
