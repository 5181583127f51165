use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_collection, open_site, OutputConfig};
use crate::content::Collection;
use crate::http::client::Client;
use crate::search::render::Highlighter;
use crate::search::{load_index, SuggestionItem, SuggestionPanel};

#[derive(Args)]
pub struct SearchArgs {
    /// The search query
    query: String,

    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Record source URL (default: `search.source_url`, or `<site.base_url>/api/videos.json`)
    #[arg(long, short = 's')]
    source: Option<String>,

    /// Maximum number of suggestions (default: `search.max_suggestions`)
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Print the panel markup instead of a text listing
    #[arg(long)]
    html: bool,
}

/// JSON output format for suggestions
#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    source: &'a str,
    records: usize,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    panel: Option<&'a SuggestionPanel>,
}

pub async fn run(args: SearchArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;

    let source_url = args.source.unwrap_or_else(|| config.source_url());
    let client = Client::new(&source_url);

    // Cards for the fallback path; a broken collection just means no fallback.
    let page = open_collection(&site_root, &config).unwrap_or_else(|e| {
        tracing::warn!("{:#}", e);
        Collection::default()
    });

    let limit = args.limit.unwrap_or(config.search.max_suggestions);
    let index = load_index(&client, &page).await.with_limit(limit);

    let query = args.query.trim();
    let panel = (query.chars().count() >= config.search.min_query_len)
        .then(|| SuggestionPanel::build(query, &index.search(query)));
    let count = panel.as_ref().map_or(0, |p| p.len() - 1);

    if output.json {
        let json_output = SearchOutput {
            query,
            source: client.url(),
            records: index.len(),
            count,
            panel: panel.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    let Some(panel) = panel else {
        if !output.quiet {
            println!(
                "{} Query must be at least {} characters",
                "!".yellow(),
                config.search.min_query_len
            );
        }
        return Ok(());
    };

    if args.html {
        print!("{}", panel.to_html(None));
        return Ok(());
    }

    if output.verbose && !output.quiet {
        println!("  Source:  {}", client.url());
        println!("  Records: {}", index.len());
        println!();
    }

    if panel.no_results {
        println!("No videos found for \"{}\"", query);
    } else if !output.quiet {
        println!(
            "{} {} suggestions for \"{}\"",
            "✓".green(),
            count.to_string().cyan(),
            query
        );
        println!();
    }

    for item in &panel.items {
        match item {
            SuggestionItem::Video {
                title,
                author,
                category,
                href,
            } => {
                println!("  {}", highlighted(panel.highlighter(), title));
                println!("    by {} • {}", author, category);
                println!("    {}", href.dimmed());
            }
            SuggestionItem::ViewAll { href, .. } => {
                println!();
                println!("  View all results for \"{}\"  {}", query, href.dimmed());
            }
        }
    }

    Ok(())
}

/// Terminal rendition of a title with query matches emphasized
pub(super) fn highlighted(highlighter: &Highlighter, text: &str) -> String {
    highlighter
        .segments(text)
        .into_iter()
        .map(|(segment, hit)| {
            if hit {
                segment.black().on_yellow().to_string()
            } else {
                segment.bold().to_string()
            }
        })
        .collect()
}
