//! Command handlers shared by the binary and tests.
//!
//! Each handler returns the JSON document the CLI prints on stdout. Errors
//! are rendered by [`error_body`] in the same `{ "error": ... }` shape.

use serde::Serialize;
use serde_json::{Value, json};
use torrent_search::{DetailLayout, PageFetcher, SourceSelector, TorrentSearch};

use crate::error::{Result, ScoutError};

/// Error document printed in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// HTTP-style status code for the failure class.
    pub status: u16,
}

/// Render `err` as an [`ErrorBody`].
pub fn error_body(err: &ScoutError) -> ErrorBody {
    ErrorBody {
        error: err.to_string(),
        status: err.status(),
    }
}

/// `search <query> [--source <id>]`
pub async fn search<F: PageFetcher>(client: &TorrentSearch<F>, query: &str, source: &str) -> Result<Value> {
    let selector: SourceSelector = source.parse()?;
    let response = client.aggregate(query, selector).await?;
    tracing::info!(total = response.total, %selector, "search finished");
    Ok(serde_json::to_value(response)?)
}

/// `magnet <source> <id>`
pub async fn magnet<F: PageFetcher>(client: &TorrentSearch<F>, source: &str, identifier: &str) -> Result<Value> {
    let layout: DetailLayout = source.parse()?;
    let detail = client.resolve_detail(layout, identifier).await?;
    Ok(json!({ "success": true, "data": detail }))
}

/// `extract <url> <source>`
pub async fn extract<F: PageFetcher>(client: &TorrentSearch<F>, url: &str, source: &str) -> Result<Value> {
    let detail = client.extract_from_url(url, source).await?;
    Ok(json!({ "success": true, "data": detail }))
}

/// `sources`
pub fn sources() -> Result<Value> {
    Ok(json!({ "sources": torrent_search::sources() }))
}

/// Pretty-print `value` for stdout.
pub fn render(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(ScoutError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use torrent_search::{SearchConfig, SearchError};

    const APIBAY: &str =
        r#"[{"name":"X","size":1048576,"seeders":"5","leechers":"2","id":"9","info_hash":"ABCD"}]"#;

    const DETAIL: &str = r#"<html><body>
<div class="box-info-heading"><h1>Sample</h1></div>
<a href="magnet:?xt=urn:btih:SAMPLE">Magnet</a>
</body></html>"#;

    /// Serves Apibay JSON and one detail page; everything else fails.
    #[derive(Default)]
    struct CannedFetcher {
        calls: AtomicUsize,
    }

    impl CannedFetcher {
        fn reply(&self, url: &str) -> std::result::Result<String, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.contains("q.php") {
                Ok(APIBAY.to_string())
            } else if url.contains("/torrent/") {
                Ok(DETAIL.to_string())
            } else {
                Err(SearchError::Http(format!("unreachable: {url}")))
            }
        }
    }

    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<String, SearchError> {
            self.reply(url)
        }

        async fn fetch_direct(&self, url: &str) -> std::result::Result<String, SearchError> {
            self.reply(url)
        }
    }

    fn client() -> TorrentSearch<CannedFetcher> {
        TorrentSearch::with_fetcher(CannedFetcher::default(), SearchConfig::default())
    }

    #[tokio::test]
    async fn search_renders_response() {
        let value = search(&client(), "ubuntu", "all").await.expect("search");
        assert_eq!(value["query"], "ubuntu");
        assert_eq!(value["total"], 1);
        assert_eq!(value["results"][0]["source"], "Apibay");
        assert_eq!(value["results"][0]["size"], "1 MB");
    }

    #[tokio::test]
    async fn search_rejects_unknown_source() {
        let err = search(&client(), "ubuntu", "kickass").await.unwrap_err();
        let body = error_body(&err);
        assert_eq!(body.status, 400);
        assert!(body.error.contains("Available sources"));
    }

    #[tokio::test]
    async fn magnet_wraps_detail() {
        let value = magnet(&client(), "1337x", "77").await.expect("magnet");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["hash"], "77");
        assert_eq!(value["data"]["magnet"], "magnet:?xt=urn:btih:SAMPLE");
    }

    #[tokio::test]
    async fn extract_unsupported_source_is_400() {
        let c = client();
        let err = extract(&c, "https://yts.mx/torrent/1", "yts").await.unwrap_err();
        assert_eq!(error_body(&err).status, 400);
    }

    #[test]
    fn sources_lists_selectors() {
        let value = sources().expect("sources");
        let list = value["sources"].as_array().expect("array");
        assert_eq!(list[0]["id"], "all");
        assert!(list.iter().any(|s| s["id"] == "TPB"));
    }

    #[test]
    fn render_is_pretty_json() {
        let text = render(&json!({"a": 1})).expect("render");
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }
}
