use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_collection, open_site, OutputConfig};
use crate::cdn::MediaUrls;
use crate::content::slug::generate_slug;
use crate::content::taxonomy::{label, Taxonomy};
use crate::content::VideoEntry;

/// Number of related videos shown on a video page
const RELATED_LIMIT: usize = 3;

#[derive(Args)]
pub struct ShowArgs {
    /// Video slug (file name without `.md`)
    slug: String,

    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    entry: &'a VideoEntry,
    href: String,
    media: MediaUrls,
    related: Vec<RelatedOutput<'a>>,
}

#[derive(Serialize)]
struct RelatedOutput<'a> {
    title: &'a str,
    href: String,
}

pub async fn run(args: ShowArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;
    let collection = open_collection(&site_root, &config)?;

    let entry = collection
        .by_slug(&args.slug)
        .with_context(|| format!("No video with slug '{}'", args.slug))?;
    let post = &entry.post;
    let media = entry.media(&config.cdn);
    let related = collection.related(&entry.slug, &post.category, RELATED_LIMIT);

    if output.json {
        let json_output = ShowOutput {
            entry,
            href: entry.href(),
            media,
            related: related
                .iter()
                .map(|r| RelatedOutput {
                    title: &r.post.title,
                    href: r.href(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    println!("{}", post.title.bold());
    println!(
        "  by {} • {}",
        post.author.cyan(),
        post.category.blue()
    );
    println!("  {}", post.description);
    println!();
    println!("  Page:      {}", entry.href());
    println!(
        "  Category:  /category/{}",
        generate_slug(&post.category)
    );
    println!("  Published: {}", post.publish_date);
    println!("  Quality:   {}", post.quality);
    if let Some(year) = post.year {
        println!("  Year:      {}", year);
    }
    if let Some(duration) = post.duration {
        println!("  Duration:  {}s", duration);
    }
    if let Some(ref url) = post.source_url {
        println!("  Source:    {}", url);
    }
    if !post.tags.is_empty() {
        println!("  Tags:      {}", post.tags.join(", "));
    }
    for taxonomy in Taxonomy::ALL {
        let values = post.taxonomy(taxonomy);
        if values.is_empty() {
            continue;
        }
        let labels: Vec<_> = values.iter().map(|v| label(taxonomy, v)).collect();
        println!("  {:<10} {}", format!("{}:", taxonomy.key()), labels.join(", "));
    }

    println!();
    println!("  Video:     {}", media.video_url);
    println!("  Preview:   {}", media.preview_url);
    if output.verbose {
        println!("  Cache:     {}", media.cache_control.dimmed());
    }

    if !related.is_empty() && !output.quiet {
        println!("\n  Related:");
        for r in related {
            println!("    {}  {}", r.post.title, r.href().dimmed());
        }
    }

    Ok(())
}
