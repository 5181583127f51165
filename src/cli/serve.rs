use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::OutputConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Site to serve (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// HTTP server port (default: `server.port` from config)
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServeArgs, _output: OutputConfig) -> Result<()> {
    let site_root = args
        .path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Invalid path: {}", e))?;

    crate::http::run_server(site_root, args.port).await
}
