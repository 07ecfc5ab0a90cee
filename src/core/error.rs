use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockpingError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Path error: {0}")]
    PathError(String),
}
