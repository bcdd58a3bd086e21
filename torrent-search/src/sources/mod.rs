//! Torrent source implementations.
//!
//! Each module provides a struct implementing [`crate::extractor::SourceExtractor`]
//! for one upstream site.

pub mod apibay;
pub mod piratebay;
pub mod rarbg;
pub mod x1337;
pub mod yts;

pub use apibay::ApibaySource;
pub use piratebay::PirateBaySource;
pub use rarbg::RarbgSource;
pub use x1337::X1337Source;
pub use yts::YtsSource;

use crate::config::SearchConfig;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::types::{Source, TorrentRecord};

/// Run one source's search, dispatching to the concrete extractor.
///
/// Never fails: extractor errors are logged and yield an empty list.
pub async fn search_source<F: PageFetcher>(
    source: Source,
    query: &str,
    fetcher: &F,
    config: &SearchConfig,
) -> Vec<TorrentRecord> {
    match source {
        Source::X1337 => X1337Source.search_or_empty(query, fetcher, config).await,
        Source::PirateBay => PirateBaySource.search_or_empty(query, fetcher, config).await,
        Source::Apibay => ApibaySource.search_or_empty(query, fetcher, config).await,
        Source::Yts => YtsSource.search_or_empty(query, fetcher, config).await,
        Source::Rarbg => RarbgSource.search_or_empty(query, fetcher, config).await,
    }
}

/// The upstream search URL `source` would fetch for `query`.
pub fn search_url(source: Source, query: &str, config: &SearchConfig) -> String {
    match source {
        Source::X1337 => X1337Source.search_url(query, config),
        Source::PirateBay => PirateBaySource.search_url(query, config),
        Source::Apibay => ApibaySource.search_url(query, config),
        Source::Yts => YtsSource.search_url(query, config),
        Source::Rarbg => RarbgSource.search_url(query, config),
    }
}
