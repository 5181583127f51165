use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_site, OutputConfig};
use crate::cdn::{self, MediaUrls, Quality};

#[derive(Args)]
pub struct CdnArgs {
    /// Video file name as stored in a post's `videoFileName`
    file: String,

    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Preferred quality
    #[arg(long, short = 'q', value_enum, default_value_t = Quality::FullHd)]
    quality: Quality,

    /// HEAD the URLs and pick the best reachable one
    #[arg(long)]
    verify: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CdnOutput {
    file: String,
    quality: Quality,
    #[serde(flatten)]
    media: MediaUrls,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_url: Option<String>,
}

pub async fn run(args: CdnArgs, output: OutputConfig) -> Result<()> {
    let (_site_root, config) = open_site(&args.path)?;
    let media = cdn::media_urls(&config.cdn, &args.file, args.quality);

    let best_url = if args.verify {
        let http = reqwest::Client::new();
        Some(cdn::best_video_url(&http, &config.cdn, &args.file, args.quality).await)
    } else {
        None
    };

    if output.json {
        let json_output = CdnOutput {
            file: args.file,
            quality: args.quality,
            media,
            best_url,
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    println!("  Video:   {}", media.video_url.cyan());
    println!("  Preview: {}", media.preview_url);
    if !output.quiet {
        println!("  Sources:");
        for source in &media.video_sources {
            println!("    {} ({})", source.src, source.mime_type.dimmed());
        }
        println!("  Cache:   {}", media.cache_control.dimmed());
    }
    if let Some(url) = best_url {
        println!("  Best:    {}", url.green());
    }

    Ok(())
}
