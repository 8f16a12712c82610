use std::path::PathBuf;

use thiserror::Error;

/// Every way a send or a room listing can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("an access token is required (-T or WEBEX_TOKEN)")]
    MissingToken,

    #[error("either a room id (-R) or a recipient email (-r) is required")]
    MissingDestination,

    #[error("a room id and a recipient email cannot be used together")]
    ConflictingDestination,

    #[error("only one of a file (-f), a file URL (-F) or a card (-A) can be attached")]
    ConflictingAttachment,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes, the limit is {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("unsupported file type for {} (allowed: {allowed})", path.display())]
    UnsupportedExtension { path: PathBuf, allowed: String },

    #[error("adaptive card {} is not valid JSON: {source}", path.display())]
    InvalidCard {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode form body: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("server answered {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
