//! # torrent-search
//!
//! Torrent metadata aggregation across public torrent index sites.
//!
//! Queries several sites concurrently, normalises what each one returns into
//! a common [`TorrentRecord`] shape, and ranks the merged list by seeders.
//! Detail pages can be resolved into magnet links on demand.
//!
//! ## Design
//!
//! - Scrapes 1337x, The Pirate Bay, YTS and RARBG through rotating CORS
//!   proxies using CSS selectors on the returned HTML
//! - Calls the Apibay JSON API directly
//! - Every source is queried concurrently and all branches settle; a failing
//!   source contributes zero records instead of failing the search
//! - Proxy/User-Agent pools, retry budget and backoff are plain configuration
//!   ([`FetchConfig`]) with optional seeded selection for reproducible runs
//! - Optional in-memory response cache with TTL
//!
//! ## Security
//!
//! - No network listeners: this is a library, not a server
//! - Queries are logged only at trace level
//! - Nothing is persisted

pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod http;
pub mod magnet;
pub mod markup;
pub mod normalize;
pub mod orchestrator;
pub mod sources;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{FetchConfig, ProxySelection, SearchConfig, SourceEndpoints};
pub use error::{Result, SearchError};
pub use extractor::SourceExtractor;
pub use http::{PageFetcher, ProxyFetcher};
pub use normalize::format_bytes;
pub use types::{
    sources, DetailLayout, MagnetDetail, SearchResponse, Source, SourceInfo, SourceSelector,
    TorrentRecord,
};

use cache::{CacheKey, ResponseCache};

/// Aggregating search client.
///
/// Owns the page fetcher, the configuration and the optional response
/// cache. Cheap to share behind an `Arc`; all methods take `&self`.
pub struct TorrentSearch<F: PageFetcher = ProxyFetcher> {
    fetcher: F,
    config: SearchConfig,
    cache: Option<ResponseCache>,
}

impl TorrentSearch<ProxyFetcher> {
    /// Build a client that fetches through the configured proxy pool.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> torrent_search::Result<()> {
    /// use torrent_search::{SearchConfig, SourceSelector, TorrentSearch};
    ///
    /// let client = TorrentSearch::new(SearchConfig::default())?;
    /// let response = client.aggregate("ubuntu", SourceSelector::All).await?;
    /// for record in &response.results {
    ///     println!("{} [{}] {} seeds", record.name, record.source, record.seeds);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = ProxyFetcher::new(config.fetch.clone())?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher> TorrentSearch<F> {
    /// Build a client around an existing fetcher.
    pub fn with_fetcher(fetcher: F, config: SearchConfig) -> Self {
        let cache = ResponseCache::new(config.cache_ttl_seconds);
        Self {
            fetcher,
            config,
            cache,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search the sources named by `selector` and rank the merged results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] for a blank query, or
    /// [`SearchError::Timeout`] when a single selected source overruns the
    /// configured deadline. Source failures yield fewer results, not errors.
    pub async fn aggregate(&self, query: &str, selector: SourceSelector) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidInput("query parameter is required".into()));
        }

        let key = CacheKey::new(query, selector, &self.config.sources);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key).await {
                tracing::trace!(%selector, "cache hit");
                return Ok(hit);
            }
        }

        tracing::trace!(query, %selector, "aggregating");
        let response =
            orchestrator::search::orchestrate_search(query, selector, &self.fetcher, &self.config)
                .await?;
        tracing::debug!(total = response.total, %selector, "search complete");

        if let Some(cache) = &self.cache {
            cache.insert(key, response.clone()).await;
        }
        Ok(response)
    }

    /// Resolve the magnet on `layout`'s detail page for `identifier`.
    ///
    /// # Errors
    ///
    /// See [`magnet::resolve_detail`].
    pub async fn resolve_detail(&self, layout: DetailLayout, identifier: &str) -> Result<MagnetDetail> {
        magnet::resolve_detail(layout, identifier, &self.fetcher, &self.config).await
    }

    /// Resolve the magnet on a caller-supplied detail page.
    ///
    /// # Errors
    ///
    /// See [`magnet::extract_from_url`].
    pub async fn extract_from_url(&self, page_url: &str, source: &str) -> Result<MagnetDetail> {
        magnet::extract_from_url(page_url, source, &self.fetcher).await
    }
}

/// One-shot search with a fresh client.
///
/// # Errors
///
/// Same as [`TorrentSearch::new`] and [`TorrentSearch::aggregate`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> torrent_search::Result<()> {
/// let config = torrent_search::SearchConfig::default();
/// let response = torrent_search::search("debian", "yts".parse()?, &config).await?;
/// println!("{} results", response.total);
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, selector: SourceSelector, config: &SearchConfig) -> Result<SearchResponse> {
    TorrentSearch::new(config.clone())?.aggregate(query, selector).await
}
