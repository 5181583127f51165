//! File-based video collection: `<content_dir>/<slug>.md` with YAML frontmatter.

pub mod collection;
pub mod grid;
pub mod slug;
pub mod taxonomy;
pub mod writer;

use std::path::PathBuf;
use thiserror::Error;

pub use collection::{Collection, VideoEntry};
pub use grid::{Grid, SortKey};
pub use writer::NewVideo;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}: missing frontmatter block")]
    MissingFrontmatter(PathBuf),

    #[error("{path}: invalid frontmatter: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
