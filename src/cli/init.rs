use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::OutputConfig;
use crate::config::Config;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    force: bool,
}

#[derive(Serialize)]
struct InitOutput {
    status: String,
    path: String,
    config: String,
    content: String,
}

pub async fn run(args: InitArgs, output: OutputConfig) -> Result<()> {
    let site_root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;

    let data_dir = Config::data_dir(&site_root);
    let config_path = Config::config_path(&site_root);

    if config_path.exists() && !args.force {
        if output.json {
            let config = Config::load(&config_path)?;
            let json_output = InitOutput {
                status: "already_initialized".to_string(),
                path: data_dir.display().to_string(),
                config: config_path.display().to_string(),
                content: config.content_path(&site_root).display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        } else {
            bail!(
                "Showreel already initialized in {}. Use --force to reinitialize.",
                data_dir.display()
            );
        }
        return Ok(());
    }

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let config = Config::default();
    config.save(&config_path)?;

    if output.verbose && !output.quiet && !output.json {
        println!("  Creating config: {}", config_path.display());
    }

    let content_dir = config.content_path(&site_root);
    std::fs::create_dir_all(&content_dir).with_context(|| {
        format!(
            "Failed to create content directory: {}",
            content_dir.display()
        )
    })?;

    if output.verbose && !output.quiet && !output.json {
        println!("  Creating content directory: {}", content_dir.display());
    }

    if output.json {
        let json_output = InitOutput {
            status: "initialized".to_string(),
            path: data_dir.display().to_string(),
            config: config_path.display().to_string(),
            content: content_dir.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !output.quiet {
        println!(
            "{} Showreel initialized in {}",
            "✓".green(),
            data_dir.display()
        );
        println!("  Config:  {}", config_path.display());
        println!("  Content: {}", content_dir.display());
        println!("\nNext steps:");
        println!("  {} to add a video post", "showreel create --from post.json".cyan());
        println!("  {} to serve /api/videos.json", "showreel serve".cyan());
        println!("  {} to try the search box", "showreel browse".cyan());
    }

    Ok(())
}
