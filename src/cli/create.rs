use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

use super::{open_site, OutputConfig};
use crate::content::{writer, NewVideo};

#[derive(Args)]
pub struct CreateArgs {
    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// JSON submission to read (`-` for stdin)
    #[arg(long)]
    from: PathBuf,

    /// Print the markdown instead of writing it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
struct CreateOutput {
    success: bool,
    filename: String,
    slug: String,
    path: String,
}

pub async fn run(args: CreateArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;

    let body = if args.from.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read submission from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.from)
            .with_context(|| format!("Failed to read {}", args.from.display()))?
    };

    if body.trim().is_empty() {
        bail!("Request body is empty");
    }
    let video: NewVideo = serde_json::from_str(&body).context("Failed to parse submission")?;

    if args.dry_run {
        print!("{}", video.render_markdown()?);
        return Ok(());
    }

    let written = writer::write_post(&config.content_path(&site_root), &video)?;

    if output.json {
        let json_output = CreateOutput {
            success: true,
            filename: written.filename,
            slug: written.slug,
            path: written.path.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !output.quiet {
        println!("{} Video post created successfully!", "✓".green());
        println!("  File: {}", written.path.display());
        println!("  Page: {}", format!("/videos/{}", written.slug).cyan());
    }

    Ok(())
}
