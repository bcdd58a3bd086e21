//! Core types for torrent records, source identification and magnet details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Size string used when a source does not expose one.
pub const UNKNOWN_SIZE: &str = "Unknown";

/// A single torrent listing normalised from one upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Display name of the torrent. Never empty.
    pub name: String,
    /// Human-readable size, or [`UNKNOWN_SIZE`].
    pub size: String,
    /// Seeder count; 0 when the upstream value is unparsable.
    pub seeds: u64,
    /// Leecher count; 0 when the upstream value is unparsable.
    pub leeches: u64,
    /// Which source produced this record.
    pub source: Source,
    /// Absolute URL of the item's detail page, if the source has one.
    pub link: Option<String>,
    /// Magnet URI, if the listing exposes one directly.
    pub magnet: Option<String>,
    /// Upstream item id (Apibay only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// BitTorrent info-hash (Apibay only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
}

impl TorrentRecord {
    /// A record with no size, counts or links. Callers fill in what they parsed.
    pub fn named(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            size: UNKNOWN_SIZE.to_string(),
            seeds: 0,
            leeches: 0,
            source,
            link: None,
            magnet: None,
            id: None,
            info_hash: None,
        }
    }
}

/// Upstream torrent sites that torrent-search can query.
///
/// Serializes by display name. Deserialization also accepts the selector
/// identifiers listed by [`sources`], so config files can use either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// 1337x: popular general-purpose index.
    #[serde(rename = "1337x", alias = "1337X")]
    X1337,
    /// The Pirate Bay HTML search.
    #[serde(
        rename = "The Pirate Bay",
        alias = "TPB",
        alias = "tpb",
        alias = "thepiratebay",
        alias = "piratebay"
    )]
    PirateBay,
    /// The Pirate Bay JSON API at apibay.org.
    #[serde(rename = "Apibay", alias = "apibay")]
    Apibay,
    /// YTS: movie releases.
    #[serde(rename = "YTS", alias = "yts")]
    Yts,
    /// RARBG.
    #[serde(rename = "RARBG", alias = "rarbg")]
    Rarbg,
}

impl Source {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X1337 => "1337x",
            Self::PirateBay => "The Pirate Bay",
            Self::Apibay => "Apibay",
            Self::Yts => "YTS",
            Self::Rarbg => "RARBG",
        }
    }

    /// Returns the short identifier clients use to select this source.
    pub fn id(&self) -> &'static str {
        match self {
            Self::X1337 => "1337x",
            Self::PirateBay => "TPB",
            Self::Apibay => "Apibay",
            Self::Yts => "YTS",
            Self::Rarbg => "RARBG",
        }
    }

    /// One-line description shown in source listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::X1337 => "Popular torrent search engine",
            Self::PirateBay => "Famous torrent index",
            Self::Apibay => "The Pirate Bay API (clean JSON)",
            Self::Yts => "Movie torrents",
            Self::Rarbg => "High-quality torrents",
        }
    }

    /// Returns all available source variants, in fan-out order.
    pub fn all() -> &'static [Source] {
        &[
            Self::X1337,
            Self::PirateBay,
            Self::Apibay,
            Self::Yts,
            Self::Rarbg,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1337x" => Ok(Self::X1337),
            "tpb" | "thepiratebay" | "piratebay" => Ok(Self::PirateBay),
            "apibay" => Ok(Self::Apibay),
            "yts" => Ok(Self::Yts),
            "rarbg" => Ok(Self::Rarbg),
            _ => Err(SearchError::InvalidInput(format!(
                "invalid source '{s}'. Available sources: all, 1337x, TPB, Apibay, YTS, RARBG"
            ))),
        }
    }
}

/// Which sources a search request fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceSelector {
    /// Every configured source, concurrently.
    #[default]
    All,
    /// Exactly one source.
    One(Source),
}

impl fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::One(source) => f.write_str(source.id()),
        }
    }
}

impl FromStr for SourceSelector {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::One)
    }
}

/// Detail-page layouts the magnet resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailLayout {
    /// `https://1337x.to/torrent/<id>/`
    X1337,
    /// `https://rarbg.to/torrent/<id>`
    Rarbg,
    /// `https://thepiratebay.org/description.php?id=<id>`
    PirateBay,
}

impl DetailLayout {
    /// The source whose detail pages use this layout.
    pub fn source(&self) -> Source {
        match self {
            Self::X1337 => Source::X1337,
            Self::Rarbg => Source::Rarbg,
            Self::PirateBay => Source::PirateBay,
        }
    }

    /// Identifiers accepted by [`DetailLayout::from_str`].
    pub fn supported() -> &'static [&'static str] {
        &["1337x", "rarbg", "tpb", "thepiratebay"]
    }
}

impl FromStr for DetailLayout {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1337x" => Ok(Self::X1337),
            "rarbg" => Ok(Self::Rarbg),
            "tpb" | "thepiratebay" => Ok(Self::PirateBay),
            _ => Err(SearchError::InvalidSource(format!(
                "'{s}' (supported: {})",
                Self::supported().join(", ")
            ))),
        }
    }
}

/// Magnet link plus the metadata found on an item's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnetDetail {
    /// The identifier (hash or numeric id) the page was looked up by.
    #[serde(rename = "hash")]
    pub hash_or_id: String,
    /// Title shown on the detail page.
    pub title: String,
    /// Human-readable size, or [`UNKNOWN_SIZE`].
    pub size: String,
    /// Seeder count.
    pub seeds: u64,
    /// Leecher count.
    pub leeches: u64,
    /// The magnet URI. Always present and non-empty.
    pub magnet: String,
    /// Source whose layout was parsed.
    pub source: Source,
    /// The detail page URL that was fetched.
    pub url: String,
}

/// Result of an aggregated search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as submitted.
    pub query: String,
    /// Number of records in `results`.
    pub total: usize,
    /// Records from every contributing source, seeds descending.
    pub results: Vec<TorrentRecord>,
    /// When aggregation completed.
    pub timestamp: DateTime<Utc>,
}

/// An entry in the catalog of selectable sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    /// Selector identifier (`all`, `1337x`, `TPB`, ...).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Lists every selectable source, starting with `all`.
pub fn sources() -> Vec<SourceInfo> {
    let mut catalog = vec![SourceInfo {
        id: "all",
        name: "All Sources",
        description: "Search across all available sources",
    }];
    catalog.extend(Source::all().iter().map(|source| SourceInfo {
        id: source.id(),
        name: source.name(),
        description: source.description(),
    }));
    catalog
}
