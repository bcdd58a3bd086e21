//! Trait definition for pluggable per-site extractors.
//!
//! Each upstream site (1337x, The Pirate Bay, Apibay, YTS, RARBG)
//! implements [`SourceExtractor`] to provide a uniform interface for
//! building a search URL and turning the response into records.

use std::future::Future;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::PageFetcher;
use crate::types::{Source, TorrentRecord};

/// A pluggable torrent source.
///
/// Implementors handle their own:
///
/// - search URL construction with query encoding
/// - choice of proxied or direct fetch
/// - response parsing (HTML selectors or JSON mapping)
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait SourceExtractor: Send + Sync {
    /// Returns which [`Source`] this implementation represents.
    fn source(&self) -> Source;

    /// The upstream search URL for `query`.
    fn search_url(&self, query: &str, config: &SearchConfig) -> String;

    /// Fetch and parse results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the fetch is exhausted or the response
    /// cannot be parsed at all. Individual malformed fields never fail the
    /// call; they fall back to defaults.
    fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> impl Future<Output = Result<Vec<TorrentRecord>, SearchError>> + Send;

    /// Like [`SourceExtractor::search`], but failures become an empty list.
    ///
    /// The error is logged at warn level; it never reaches sibling sources.
    fn search_or_empty<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> impl Future<Output = Vec<TorrentRecord>> + Send {
        async move {
            match self.search(query, fetcher, config).await {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(source = %self.source(), error = %err, "source search failed");
                    Vec::new()
                }
            }
        }
    }
}
