//! Apibay: The Pirate Bay's JSON API.
//!
//! apibay.org answers with CORS-friendly JSON, so this source skips the
//! proxy layer and HTML parsing entirely. Numeric fields arrive as either
//! JSON numbers or numeric strings depending on the endpoint version.

use serde::Deserialize;
use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::SourceExtractor;
use crate::http::PageFetcher;
use crate::normalize::{format_bytes, parse_count};
use crate::types::{Source, TorrentRecord, UNKNOWN_SIZE};

/// Apibay JSON API client.
pub struct ApibaySource;

/// One upstream entry. Every field is optional; bad entries degrade, not fail.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApibayEntry {
    name: Option<String>,
    size: Option<Value>,
    seeders: Option<Value>,
    leechers: Option<Value>,
    id: Option<Value>,
    info_hash: Option<String>,
}

impl SourceExtractor for ApibaySource {
    fn source(&self) -> Source {
        Source::Apibay
    }

    fn search_url(&self, query: &str, config: &SearchConfig) -> String {
        format!(
            "{}/q.php?q={}&cat=0",
            config.endpoints.apibay,
            urlencoding::encode(query)
        )
    }

    async fn search<F: PageFetcher>(
        &self,
        query: &str,
        fetcher: &F,
        config: &SearchConfig,
    ) -> Result<Vec<TorrentRecord>, SearchError> {
        tracing::trace!(query, "Apibay search");
        let body = fetcher.fetch_direct(&self.search_url(query, config)).await?;
        parse_apibay_json(&body, &config.endpoints.piratebay, config.max_results_per_source)
    }
}

/// Map an Apibay response body to records.
///
/// `detail_base` is The Pirate Bay base URL used for `description.php` links.
pub(crate) fn parse_apibay_json(
    body: &str,
    detail_base: &str,
    max_results: usize,
) -> Result<Vec<TorrentRecord>, SearchError> {
    if body.trim().is_empty() || body.trim() == "No results" {
        return Ok(Vec::new());
    }

    let payload: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Apibay response is not JSON: {e}")))?;

    let entries = match payload {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return Ok(Vec::new()),
    };

    let mut results = Vec::new();

    for raw in entries {
        let entry: ApibayEntry = match serde_json::from_value(raw) {
            Ok(e) => e,
            Err(err) => {
                tracing::trace!(error = %err, "skipping malformed Apibay entry");
                continue;
            }
        };

        let name = entry.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let mut record = TorrentRecord::named(name, Source::Apibay);
        record.size = entry
            .size
            .as_ref()
            .and_then(byte_count)
            .map(format_bytes)
            .unwrap_or_else(|| UNKNOWN_SIZE.to_string());
        record.seeds = entry.seeders.as_ref().map(count).unwrap_or_default();
        record.leeches = entry.leechers.as_ref().map(count).unwrap_or_default();

        let id = entry.id.as_ref().and_then(scalar_string);
        record.link = id
            .as_ref()
            .map(|id| format!("{detail_base}/description.php?id={id}"));
        record.id = id;

        let hash = entry
            .info_hash
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        record.magnet = hash.as_ref().map(|h| magnet_for_hash(h));
        record.info_hash = hash;

        results.push(record);

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "Apibay results parsed");
    Ok(results)
}

/// Bare magnet URI for a BitTorrent info-hash.
pub fn magnet_for_hash(info_hash: &str) -> String {
    format!("magnet:?xt=urn:btih:{info_hash}")
}

/// Exact byte count from a number or numeric string.
fn byte_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient seed/leech count; anything unreadable is 0.
fn count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_default(),
        Value::String(s) => parse_count(s),
        _ => 0,
    }
}

/// Strings and numbers as plain text; everything else is absent.
fn scalar_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
