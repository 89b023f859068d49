//! Error types for mailcast operations.

use thiserror::Error;

/// Errors that can occur while turning a newsletter into speech.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no content found using the {template} template")]
    NoContent { template: String },

    #[error("speech item is {length} characters, over the {limit} character limit")]
    ItemTooLong { length: usize, limit: usize },

    #[error("Invalid SSML: {0}")]
    InvalidSsml(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
