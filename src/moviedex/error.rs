use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Storage unavailable ({}): {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("No movie info found for {0:?}")]
    MetadataNotFound(String),

    #[error("Movie {0} already exist!")]
    DuplicateTitle(String),

    #[error("Movie {0} doesn't exist!")]
    RecordNotFound(String),

    #[error("The collection is empty")]
    EmptyCollection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MovieError>;
