//! 1337x: general-purpose index with a table-based search page.
//!
//! Search results live in `.table-list` rows. Each row's name cell holds
//! two anchors: a category icon and the torrent link. Magnets are only
//! on detail pages, so records carry a link and no magnet.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::markup;
use crate::normalize::{absolute_url, parse_count, size_or_unknown};
use crate::types::{Source, TorrentRecord};
use scraper::Html;

/// 1337x HTML search scraper.
pub struct X1337Source;

impl SourceExtractor for X1337Source {
    fn source(&self) -> Source {
        Source::X1337
    }

    fn search_url(&self, query: &str, config: &SearchConfig) -> String {
        format!(
            "{}/search/{}/1/",
            config.endpoints.x1337,
            urlencoding::encode(query)
        )
    }

    async fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> Result<Vec<TorrentRecord>, SearchError> {
        tracing::trace!(query, "1337x search");
        let html = fetcher.fetch(&self.search_url(query, config)).await?;
        parse_x1337_html(&html, &config.endpoints.x1337, config.max_results_per_source)
    }
}

/// Parse a 1337x search page. Relative links are resolved against `base`.
pub(crate) fn parse_x1337_html(
    html: &str,
    base: &str,
    max_results: usize,
) -> Result<Vec<TorrentRecord>, SearchError> {
    let document = Html::parse_document(html);

    let row_sel = markup::selector(".table-list tbody tr")?;
    let torrent_link_sel = markup::selector(r#".name a[href*="/torrent/"]"#)?;
    let any_link_sel = markup::selector(".name a")?;
    let size_sel = markup::selector(".size")?;
    let seeds_sel = markup::selector(".seeds")?;
    let leeches_sel = markup::selector(".leeches")?;

    let mut results = Vec::new();

    for row in document.select(&row_sel) {
        let anchor = match markup::first(row, &torrent_link_sel)
            .or_else(|| markup::last(row, &any_link_sel))
        {
            Some(a) => a,
            None => continue,
        };

        let name = markup::text_of(anchor);
        if name.is_empty() {
            continue;
        }

        let link = match anchor.value().attr("href").and_then(|h| absolute_url(base, h)) {
            Some(l) => l,
            None => continue,
        };

        let size = markup::first(row, &size_sel)
            .map(markup::own_text)
            .unwrap_or_default();

        let mut record = TorrentRecord::named(name, Source::X1337);
        record.size = size_or_unknown(size);
        record.seeds = parse_count(&markup::first_text(row, &seeds_sel));
        record.leeches = parse_count(&markup::first_text(row, &leeches_sel));
        record.link = Some(link);
        results.push(record);

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "1337x results parsed");
    Ok(results)
}
