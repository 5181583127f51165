use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_collection, open_site, OutputConfig};
use crate::config::Config;
use crate::types::CollectionStats;

#[derive(Args)]
pub struct StatusArgs {
    /// Show per-category counts
    #[arg(long)]
    detailed: bool,

    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

#[derive(Serialize)]
struct StatusOutput {
    status: String,
    path: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<CollectionStats>,
}

pub async fn run(args: StatusArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;
    let content_dir = config.content_path(&site_root);

    if !Config::config_path(&site_root).exists() {
        if output.json {
            let json_output = StatusOutput {
                status: "not_initialized".to_string(),
                path: site_root.display().to_string(),
                content: content_dir.display().to_string(),
                stats: None,
            };
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        } else if !output.quiet {
            println!(
                "{} Showreel not initialized in {}",
                "!".yellow(),
                site_root.display()
            );
            println!("Run `showreel init` to initialize.");
        }
        return Ok(());
    }

    let stats = open_collection(&site_root, &config)?.stats();

    if output.json {
        let json_output = StatusOutput {
            status: "ready".to_string(),
            path: site_root.display().to_string(),
            content: content_dir.display().to_string(),
            stats: Some(stats),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !output.quiet {
        println!("{} Showreel status for {}", "✓".green(), site_root.display());
        println!();
        println!("  Status:       {}", "Ready".green());
        println!("  Content:      {}", content_dir.display());
        println!("  Record API:   {}", config.source_url().cyan());
        println!("  Videos:       {}", stats.total_videos.to_string().cyan());
        println!("  Featured:     {}", stats.featured.to_string().cyan());
        println!("  Authors:      {}", stats.authors.to_string().cyan());
        println!("  Tags:         {}", stats.tags.to_string().cyan());
        if let Some(ref date) = stats.latest_publish_date {
            println!("  Last publish: {}", date);
        }

        if args.detailed {
            println!("\n  Categories:");
            for cat in &stats.categories {
                println!("    {}: {} videos", cat.category.blue(), cat.video_count);
            }
        }
    }

    Ok(())
}
