//! YTS: movie releases, browse-page scraping.
//!
//! The browse page lists only titles and movie links; sizes and peer
//! counts live on per-movie pages, so records report `Unknown` and zeros.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::markup;
use crate::normalize::absolute_url;
use crate::types::{Source, TorrentRecord};
use scraper::Html;

/// YTS browse-page scraper.
pub struct YtsSource;

impl SourceExtractor for YtsSource {
    fn source(&self) -> Source {
        Source::Yts
    }

    fn search_url(&self, query: &str, config: &SearchConfig) -> String {
        format!(
            "{}/browse-movies/{}/all/all/0/latest",
            config.endpoints.yts,
            urlencoding::encode(query)
        )
    }

    async fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> Result<Vec<TorrentRecord>, SearchError> {
        tracing::trace!(query, "YTS search");
        let html = fetcher.fetch(&self.search_url(query, config)).await?;
        parse_yts_html(&html, &config.endpoints.yts, config.max_results_per_source)
    }
}

/// Parse a YTS browse page.
pub(crate) fn parse_yts_html(
    html: &str,
    base: &str,
    max_results: usize,
) -> Result<Vec<TorrentRecord>, SearchError> {
    let document = Html::parse_document(html);
    let title_sel = markup::selector(".browse-movie-titles a, a.browse-movie-title")?;

    let mut results = Vec::new();

    for anchor in document.select(&title_sel) {
        let name = markup::text_of(anchor);
        if name.is_empty() {
            continue;
        }
        let link = match anchor.value().attr("href").and_then(|h| absolute_url(base, h)) {
            Some(l) => l,
            None => continue,
        };

        let mut record = TorrentRecord::named(name, Source::Yts);
        record.link = Some(link);
        results.push(record);

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "YTS results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_YTS_HTML: &str = r#"<!DOCTYPE html>
<html><body>
<div class="browse-content">
  <div class="browse-movie-wrap">
    <div class="browse-movie-bottom">
      <a href="https://yts.mx/movies/big-buck-bunny-2008" class="browse-movie-title">Big Buck Bunny</a>
      <div class="browse-movie-year">2008</div>
    </div>
  </div>
  <div class="browse-movie-wrap">
    <div class="browse-movie-bottom">
      <a href="/movies/sintel-2010" class="browse-movie-title">Sintel</a>
    </div>
  </div>
  <div class="browse-movie-wrap">
    <div class="browse-movie-bottom">
      <a class="browse-movie-title">No Link</a>
    </div>
  </div>
  <div class="browse-movie-titles">
    <a href="https://yts.mx/movies/tears-of-steel-2012">Tears of Steel</a>
  </div>
</div>
</body></html>"#;

    #[test]
    fn search_url_encodes_query() {
        let url = YtsSource.search_url("big buck", &SearchConfig::default());
        assert_eq!(url, "https://yts.mx/browse-movies/big%20buck/all/all/0/latest");
    }

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_yts_html(MOCK_YTS_HTML, "https://yts.mx", 10).expect("should parse");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].name, "Big Buck Bunny");
        assert_eq!(
            results[0].link.as_deref(),
            Some("https://yts.mx/movies/big-buck-bunny-2008")
        );
        assert_eq!(results[0].size, "Unknown");
        assert_eq!(results[0].seeds, 0);
        assert_eq!(results[0].leeches, 0);
        assert!(results[0].magnet.is_none());

        assert_eq!(results[1].link.as_deref(), Some("https://yts.mx/movies/sintel-2010"));
        assert_eq!(results[2].name, "Tears of Steel");
    }

    #[test]
    fn anchors_without_href_are_skipped() {
        let results = parse_yts_html(MOCK_YTS_HTML, "https://yts.mx", 10).expect("should parse");
        assert!(!results.iter().any(|r| r.name == "No Link"));
    }

    #[test]
    fn parse_respects_max_results() {
        let results = parse_yts_html(MOCK_YTS_HTML, "https://yts.mx", 1).expect("should parse");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn source_is_yts() {
        assert_eq!(YtsSource.source(), Source::Yts);
    }
}
