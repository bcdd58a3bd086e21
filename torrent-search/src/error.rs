//! Error types for the torrent-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. The variants double as the failure taxonomy
//! a boundary layer maps onto status codes via [`SearchError::http_status`].

/// Errors that can occur while fetching, extracting or resolving torrents.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A request to a proxy or upstream API failed (network, timeout, non-2xx).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an upstream response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The page was fetched, but the targeted element is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing query, unknown source selector or missing request fields.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The source has no supported detail-page layout.
    #[error("unsupported source: {0}")]
    InvalidSource(String),

    /// A detail page could not be fetched after all retries.
    #[error("failed to fetch magnet link: {0}")]
    FetchFailed(String),

    /// A search operation exceeded its deadline.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// The HTTP status a request boundary should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::InvalidSource(_) => 400,
            Self::NotFound(_) => 404,
            Self::Timeout(_) => 408,
            Self::Http(_) | Self::Parse(_) | Self::FetchFailed(_) | Self::Config(_) => 500,
        }
    }
}

/// Convenience type alias for torrent-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
