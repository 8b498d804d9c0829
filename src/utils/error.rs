// src/utils/error.rs
use thiserror::Error;

// Error types for the extraction core, output storage and the driver
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Contents block never terminated (read {lines_read} lines without a repeated title)")]
    UnterminatedContents { lines_read: usize },

    #[error("No titles available to segment the anthology body")]
    EmptyTitleList,

    #[error("Titles without any content: {}", .0.join(", "))]
    IncompleteCatalog(Vec<String>),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
