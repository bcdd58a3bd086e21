//! RARBG: `lista2t` result table sorted server-side by seeders.
//!
//! Column layout: category, name, added, size, seeders, leechers, uploader.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::markup;
use crate::normalize::{absolute_url, parse_count, size_or_unknown};
use crate::types::{Source, TorrentRecord};
use scraper::Html;

/// RARBG HTML search scraper.
pub struct RarbgSource;

impl SourceExtractor for RarbgSource {
    fn source(&self) -> Source {
        Source::Rarbg
    }

    fn search_url(&self, query: &str, config: &SearchConfig) -> String {
        format!(
            "{}/torrents.php?search={}&order=seeders&by=DESC",
            config.endpoints.rarbg,
            urlencoding::encode(query)
        )
    }

    async fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> Result<Vec<TorrentRecord>, SearchError> {
        tracing::trace!(query, "RARBG search");
        let html = fetcher.fetch(&self.search_url(query, config)).await?;
        parse_rarbg_html(&html, &config.endpoints.rarbg, config.max_results_per_source)
    }
}

/// Parse a RARBG search page. The header row has no anchor and is skipped.
pub(crate) fn parse_rarbg_html(
    html: &str,
    base: &str,
    max_results: usize,
) -> Result<Vec<TorrentRecord>, SearchError> {
    let document = Html::parse_document(html);

    let row_sel = markup::selector(".lista2t tr")?;
    let name_sel = markup::selector("td:nth-child(2) a")?;
    let size_sel = markup::selector("td:nth-child(4)")?;
    let seeds_sel = markup::selector("td:nth-child(5)")?;
    let leeches_sel = markup::selector("td:nth-child(6)")?;

    let mut results = Vec::new();

    for row in document.select(&row_sel) {
        let anchor = match markup::first(row, &name_sel) {
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

        let mut record = TorrentRecord::named(name, Source::Rarbg);
        record.size = size_or_unknown(markup::first_text(row, &size_sel));
        record.seeds = parse_count(&markup::first_text(row, &seeds_sel));
        record.leeches = parse_count(&markup::first_text(row, &leeches_sel));
        record.link = Some(link);
        results.push(record);

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "RARBG results parsed");
    Ok(results)
}
