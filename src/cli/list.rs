use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_collection, open_site, OutputConfig};
use crate::content::collection::sort_by_date;
use crate::content::{Collection, Grid, SortKey, VideoEntry};
use crate::types::Card;

#[derive(Args)]
pub struct ListArgs {
    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Reorder the grid by this field
    #[arg(long, value_enum, conflicts_with = "shuffle")]
    sort: Option<SortKey>,

    /// Shuffle the grid
    #[arg(long)]
    shuffle: bool,

    /// Seed for `--shuffle`, for a reproducible order
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// Only show cards whose title, author or category contains this text
    #[arg(long, short = 'f')]
    filter: Option<String>,

    /// Only videos in this category (name, or slug like `motion-graphics`)
    #[arg(long)]
    category: Option<String>,

    /// Only videos with this tag (name or slug)
    #[arg(long)]
    tag: Option<String>,

    /// Only videos by this author (name or slug)
    #[arg(long)]
    author: Option<String>,

    /// Only featured videos
    #[arg(long)]
    featured: bool,

    /// Start from newest-first publish order instead of file order
    #[arg(long)]
    newest: bool,
}

/// Entries selected by the collection-level flags, in starting grid order
fn select<'a>(collection: &'a Collection, args: &ListArgs) -> Vec<&'a VideoEntry> {
    fn keep<'a>(entries: &mut Vec<&'a VideoEntry>, subset: &[&'a VideoEntry]) {
        entries.retain(|e| subset.iter().any(|s| std::ptr::eq(*s, *e)));
    }

    /// Exact name matches, or slug matches when the name matches nothing
    fn named<'a>(
        exact: Vec<&'a VideoEntry>,
        by_slug: impl FnOnce() -> Vec<&'a VideoEntry>,
    ) -> Vec<&'a VideoEntry> {
        if exact.is_empty() {
            by_slug()
        } else {
            exact
        }
    }

    let mut entries: Vec<&VideoEntry> = collection.all().iter().collect();
    if let Some(ref category) = args.category {
        let subset = named(collection.by_category(category), || {
            collection.by_category_slug(category)
        });
        keep(&mut entries, &subset);
    }
    if let Some(ref tag) = args.tag {
        let subset = named(collection.by_tag(tag), || collection.by_tag_slug(tag));
        keep(&mut entries, &subset);
    }
    if let Some(ref author) = args.author {
        let subset = named(collection.by_author(author), || collection.by_author_slug(author));
        keep(&mut entries, &subset);
    }
    if args.featured {
        keep(&mut entries, &collection.featured());
    }
    if args.newest {
        sort_by_date(&mut entries);
    }
    entries
}

#[derive(Serialize)]
struct ListOutput<'a> {
    count: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortKey>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    shuffled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    videos: Vec<&'a Card>,
}

pub async fn run(args: ListArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;
    let collection = open_collection(&site_root, &config)?;

    let entries = select(&collection, &args);
    let mut grid = Grid::new(entries.into_iter().map(VideoEntry::to_card).collect());
    if let Some(key) = args.sort {
        grid.sort(key);
    }
    if args.shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        grid.shuffle(&mut rng);
    }
    let visible = grid.filter(args.filter.as_deref().unwrap_or_default());

    if output.json {
        let json_output = ListOutput {
            count: visible.len(),
            total: grid.len(),
            sort: args.sort,
            shuffled: args.shuffle,
            filter: args.filter.as_deref(),
            videos: visible,
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    if grid.is_empty() {
        if !output.quiet {
            println!(
                "{} No videos in {}",
                "!".yellow(),
                config.content_path(&site_root).display()
            );
        }
        return Ok(());
    }

    if visible.is_empty() {
        println!("No videos match the filter");
        return Ok(());
    }

    if !output.quiet {
        println!(
            "{} {} of {} videos",
            "✓".green(),
            visible.len().to_string().cyan(),
            grid.len()
        );
        println!();
    }

    for card in visible {
        println!(
            "  {}  {}  {}",
            card.title_text().bold(),
            card.author_text(),
            card.category_text().blue()
        );
        if output.verbose {
            println!("    {}", card.href.as_deref().unwrap_or_default().dimmed());
        }
    }

    Ok(())
}
