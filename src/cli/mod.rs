mod browse;
mod cdn;
mod completions;
mod create;
mod init;
mod list;
mod search;
mod serve;
mod show;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::content::Collection;

#[derive(Parser)]
#[command(name = "showreel")]
#[command(about = "Motion design showreel site: content collection, record API and instant search")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show detailed progress
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a showreel site in the given directory
    Init(init::InitArgs),

    /// Serve the record API and admin endpoint over HTTP
    Serve(serve::ServeArgs),

    /// One-shot suggestions for a query
    Search(search::SearchArgs),

    /// Interactive suggestion box in the terminal
    Browse(browse::BrowseArgs),

    /// List videos as the grid shows them
    List(list::ListArgs),

    /// Show one video with its CDN URLs and related videos
    Show(show::ShowArgs),

    /// Write a new video post from a JSON submission
    Create(create::CreateArgs),

    /// Show collection statistics
    Status(status::StatusArgs),

    /// Print CDN URLs for a video file
    Cdn(cdn::CdnArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let output = OutputConfig {
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        match self.command {
            Commands::Init(args) => init::run(args, output).await,
            Commands::Serve(args) => serve::run(args, output).await,
            Commands::Search(args) => search::run(args, output).await,
            Commands::Browse(args) => browse::run(args, output).await,
            Commands::List(args) => list::run(args, output).await,
            Commands::Show(args) => show::run(args, output).await,
            Commands::Create(args) => create::run(args, output).await,
            Commands::Status(args) => status::run(args, output).await,
            Commands::Cdn(args) => cdn::run(args, output).await,
            Commands::Completions(args) => {
                completions::run(args);
                Ok(())
            }
        }
    }
}

/// Output configuration passed to all commands
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

/// Resolve a site root argument and load its configuration (defaults if uninitialized)
fn open_site(path: &Path) -> Result<(PathBuf, Config)> {
    use anyhow::Context;

    let site_root = path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", path.display()))?;
    let config = Config::load_or_default(&site_root)?;
    Ok((site_root, config))
}

/// Load the site's content collection
fn open_collection(site_root: &Path, config: &Config) -> Result<Collection> {
    use anyhow::Context;

    let dir = config.content_path(site_root);
    Collection::load(&dir).with_context(|| format!("Failed to load videos from {}", dir.display()))
}
