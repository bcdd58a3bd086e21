//! The Pirate Bay: classic `#searchResult` table layout.
//!
//! Sizes are not in a dedicated cell; they appear inside the `.detDesc`
//! line as `Uploaded 03-14 2024, Size 1.4 GiB, ULed by ...`. Rows link
//! the magnet directly, so records carry a magnet.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::markup;
use crate::normalize::{absolute_url, parse_count};
use crate::types::{Source, TorrentRecord, UNKNOWN_SIZE};

/// The Pirate Bay HTML search scraper.
pub struct PirateBaySource;

impl SourceExtractor for PirateBaySource {
    fn source(&self) -> Source {
        Source::PirateBay
    }

    fn search_url(&self, query: &str, config: &SearchConfig) -> String {
        format!(
            "{}/search/{}/0/99/0",
            config.endpoints.piratebay,
            urlencoding::encode(query)
        )
    }

    async fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> Result<Vec<TorrentRecord>, SearchError> {
        tracing::trace!(query, "Pirate Bay search");
        let html = fetcher.fetch(&self.search_url(query, config)).await?;
        parse_piratebay_html(&html, &config.endpoints.piratebay, config.max_results_per_source)
    }
}

/// `Size <value>,` inside a description line.
pub(crate) fn size_pattern() -> Result<Regex, SearchError> {
    Regex::new(r"Size\s+(.+?),").map_err(|e| SearchError::Parse(format!("invalid size pattern: {e}")))
}

/// Size from the first `desc_sel` match under `scope`, or [`UNKNOWN_SIZE`].
pub(crate) fn description_size(scope: ElementRef<'_>, desc_sel: &Selector, pattern: &Regex) -> String {
    let text = markup::first_text(scope, desc_sel);
    markup::capture(pattern, &text).unwrap_or_else(|| UNKNOWN_SIZE.to_string())
}

/// Parse a Pirate Bay search page.
pub(crate) fn parse_piratebay_html(
    html: &str,
    base: &str,
    max_results: usize,
) -> Result<Vec<TorrentRecord>, SearchError> {
    let document = Html::parse_document(html);

    let row_sel = markup::selector("#searchResult tbody tr")?;
    let name_sel = markup::selector(".detName a")?;
    let desc_sel = markup::selector(".detDesc")?;
    let count_sel = markup::selector(r#"td[align="right"]"#)?;
    let magnet_sel = markup::selector(
        r#"a[title="Download this torrent using magnet"], a[href^="magnet:"]"#,
    )?;
    let size_re = size_pattern()?;

    let mut results = Vec::new();

    for row in document.select(&row_sel) {
        let name = markup::first_text(row, &name_sel);
        if name.is_empty() {
            continue;
        }

        let mut record = TorrentRecord::named(name, Source::PirateBay);
        record.size = description_size(row, &desc_sel, &size_re);
        record.seeds = parse_count(&markup::first_text(row, &count_sel));
        record.leeches = parse_count(&markup::last_text(row, &count_sel));
        record.magnet = markup::first_attr(row, &magnet_sel, "href");
        record.link = markup::first_attr(row, &name_sel, "href").and_then(|h| absolute_url(base, &h));
        results.push(record);

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "Pirate Bay results parsed");
    Ok(results)
}
