//! torrent-scout: command-line host for the `torrent-search` aggregator.
//!
//! The binary loads an [`AppConfig`] from TOML, builds a
//! [`torrent_search::TorrentSearch`] client and prints JSON results on
//! stdout. Diagnostics go to stderr through `tracing`.

pub mod commands;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{Result, ScoutError};
