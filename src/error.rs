use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    ParseMissingSelector(String),

    #[error("Timed out fetching {url}")]
    FetchTimeout { url: String },
    #[error("Page {url} never showed a table")]
    PageNotReady { url: String },
    #[error("Page {url} answered with status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Page has no title heading")]
    MissingTitle,

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("Rename target already exists: {} -> {}", from.display(), to.display())]
    RenameCollision { from: PathBuf, to: PathBuf },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
