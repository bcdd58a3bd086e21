//! Error types for the torrent-scout host.

use torrent_search::SearchError;

/// Top-level error type for the command-line host.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// Search, magnet resolution or input validation failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Output serialization error.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoutError {
    /// Status code reported alongside the error message.
    ///
    /// Search failures keep their own mapping; everything else is a 500.
    pub fn status(&self) -> u16 {
        match self {
            Self::Search(err) => err.http_status(),
            _ => 500,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScoutError>;
