//! Error types for uploads and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File type {mime} is not accepted by filter \"{filter}\"")]
    RejectedType { mime: String, filter: String },

    #[error("Incorrect response: {0}")]
    MalformedResponse(String),

    #[error("Server reported a failed upload")]
    Unsuccessful,

    #[error("No upload endpoint configured for {0}")]
    MissingEndpoint(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
