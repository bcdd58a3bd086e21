//! Magnet resolution from per-source detail pages.
//!
//! Search listings from 1337x and RARBG carry only a detail link; the
//! magnet lives on the detail page. The resolver fetches that page through
//! the proxy layer and reads the magnet anchor plus the richer single-item
//! metadata (title, size, peer counts).
//!
//! Failure modes are kept distinct: a page that was fetched but has no
//! magnet is [`SearchError::NotFound`]; a page that could not be fetched is
//! [`SearchError::FetchFailed`]; an unsupported source is
//! [`SearchError::InvalidSource`] and never touches the network.

use scraper::Html;

use crate::config::{SearchConfig, SourceEndpoints};
use crate::error::SearchError;
use crate::http::PageFetcher;
use crate::markup;
use crate::normalize::{parse_count, size_or_unknown};
use crate::sources::piratebay::{description_size, size_pattern};
use crate::types::{DetailLayout, MagnetDetail, UNKNOWN_SIZE};

/// Fields read from a detail page. `magnet` is `None` when the anchor is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DetailFields {
    pub title: String,
    pub size: String,
    pub seeds: u64,
    pub leeches: u64,
    pub magnet: Option<String>,
}

/// Detail page URL for `identifier` under `layout`.
pub fn detail_url(layout: DetailLayout, identifier: &str, endpoints: &SourceEndpoints) -> String {
    match layout {
        DetailLayout::X1337 => format!("{}/torrent/{identifier}/", endpoints.x1337),
        DetailLayout::Rarbg => format!("{}/torrent/{identifier}", endpoints.rarbg),
        DetailLayout::PirateBay => {
            format!("{}/description.php?id={identifier}", endpoints.piratebay)
        }
    }
}

/// Look up the magnet for `identifier` on `layout`'s detail page.
///
/// # Errors
///
/// - [`SearchError::InvalidInput`] if `identifier` is blank
/// - [`SearchError::FetchFailed`] if the page cannot be fetched after retries
/// - [`SearchError::NotFound`] if the page has no magnet anchor
pub async fn resolve_detail<F: PageFetcher>(
    layout: DetailLayout,
    identifier: &str,
    fetcher: &F,
    config: &SearchConfig,
) -> Result<MagnetDetail, SearchError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(SearchError::InvalidInput("identifier is required".into()));
    }
    let url = detail_url(layout, identifier, &config.endpoints);
    resolve_page(layout, identifier.to_string(), url, fetcher).await
}

/// Extract the magnet from a caller-supplied detail page URL.
///
/// `source` is validated against the supported layouts before any
/// network activity.
///
/// # Errors
///
/// - [`SearchError::InvalidInput`] if `page_url` or `source` is blank
/// - [`SearchError::InvalidSource`] if `source` has no detail layout
/// - [`SearchError::FetchFailed`] / [`SearchError::NotFound`] as for
///   [`resolve_detail`]
pub async fn extract_from_url<F: PageFetcher>(
    page_url: &str,
    source: &str,
    fetcher: &F,
) -> Result<MagnetDetail, SearchError> {
    let page_url = page_url.trim();
    if page_url.is_empty() || source.trim().is_empty() {
        return Err(SearchError::InvalidInput("url and source are required".into()));
    }
    let layout: DetailLayout = source.parse()?;
    let identifier = identifier_from_url(page_url);
    resolve_page(layout, identifier, page_url.to_string(), fetcher).await
}

async fn resolve_page<F: PageFetcher>(
    layout: DetailLayout,
    identifier: String,
    url: String,
    fetcher: &F,
) -> Result<MagnetDetail, SearchError> {
    tracing::trace!(?layout, url, "resolving magnet");

    let html = fetcher.fetch(&url).await.map_err(|err| {
        tracing::warn!(?layout, url, error = %err, "detail page fetch failed");
        match err {
            SearchError::Http(msg) => SearchError::FetchFailed(msg),
            other => SearchError::FetchFailed(other.to_string()),
        }
    })?;

    let fields = parse_detail_html(layout, &html)?;
    let magnet = match fields.magnet {
        Some(m) => m,
        None => {
            tracing::debug!(?layout, url, "no magnet anchor on detail page");
            return Err(SearchError::NotFound(
                "magnet link not found; this torrent might not have one available".into(),
            ));
        }
    };

    Ok(MagnetDetail {
        hash_or_id: identifier,
        title: fields.title,
        size: fields.size,
        seeds: fields.seeds,
        leeches: fields.leeches,
        magnet,
        source: layout.source(),
        url,
    })
}

/// Read the detail-page fields for `layout`.
pub(crate) fn parse_detail_html(layout: DetailLayout, html: &str) -> Result<DetailFields, SearchError> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let magnet_sel = markup::selector(r#"a[href^="magnet:?"]"#)?;
    let magnet = markup::first_attr(root, &magnet_sel, "href");

    let fields = match layout {
        DetailLayout::X1337 => {
            let title_sel = markup::selector(".box-info-heading h1")?;
            let size_sel = markup::selector(".size")?;
            let seeds_sel = markup::selector(".seeds")?;
            let leeches_sel = markup::selector(".leeches")?;
            DetailFields {
                title: markup::first_text(root, &title_sel),
                size: size_or_unknown(markup::first_text(root, &size_sel)),
                seeds: parse_count(&markup::first_text(root, &seeds_sel)),
                leeches: parse_count(&markup::first_text(root, &leeches_sel)),
                magnet,
            }
        }
        DetailLayout::Rarbg => {
            let title_sel = markup::selector("h1")?;
            let cell_sel = markup::selector("td")?;
            let labelled = |label: &str| {
                markup::labelled_cell(root, &cell_sel, label)
                    .map(markup::text_of)
                    .unwrap_or_default()
            };
            DetailFields {
                title: markup::first_text(root, &title_sel),
                size: size_or_unknown(labelled("Size")),
                seeds: parse_count(&labelled("Seeders")),
                leeches: parse_count(&labelled("Leechers")),
                magnet,
            }
        }
        DetailLayout::PirateBay => {
            let title_sel = markup::selector("#title, .detName")?;
            let desc_sel = markup::selector(".detDesc")?;
            let term_sel = markup::selector("dt")?;
            let count_sel = markup::selector(r#"td[align="right"]"#)?;
            let mut size = description_size(root, &desc_sel, &size_pattern()?);
            if size == UNKNOWN_SIZE {
                size = size_or_unknown(
                    markup::labelled_cell(root, &term_sel, "Size")
                        .map(markup::text_of)
                        .unwrap_or_default(),
                );
            }
            DetailFields {
                title: markup::first_text(root, &title_sel),
                size,
                seeds: parse_count(&markup::first_text(root, &count_sel)),
                leeches: parse_count(&markup::last_text(root, &count_sel)),
                magnet,
            }
        }
    };

    Ok(fields)
}

/// Best-effort item identifier from a detail page URL.
///
/// Uses the `id` query parameter, else the path segment after `torrent`,
/// else the URL itself.
pub fn identifier_from_url(page_url: &str) -> String {
    let parsed = match url::Url::parse(page_url) {
        Ok(u) => u,
        Err(_) => return page_url.to_string(),
    };

    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "id") {
        if !id.is_empty() {
            return id.into_owned();
        }
    }

    let mut segments = parsed.path_segments().into_iter().flatten();
    if segments.any(|s| s == "torrent") {
        if let Some(id) = segments.next().filter(|s| !s.is_empty()) {
            return id.to_string();
        }
    }

    page_url.to_string()
}
