//! Core search orchestrator: concurrent multi-source fan-out, merge, rank.
//!
//! Queries the selected sources concurrently, waits for all of them to
//! settle, keeps whatever each successful branch produced, sorts the merged
//! list by seeds and stamps the completion time.

use std::time::Duration;

use chrono::Utc;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::PageFetcher;
use crate::sources::search_source;
use crate::types::{SearchResponse, Source, SourceSelector, TorrentRecord};

use super::ranking::{merge, rank_by_seeds};

/// Orchestrate a search across the sources named by `selector`.
///
/// # Pipeline
///
/// 1. Reject an empty query before any network I/O
/// 2. Fan out to the selected sources concurrently with [`futures::future::join_all`]
/// 3. Log per-source failures at warn level; keep successful batches
/// 4. Concatenate batches in source order
/// 5. Stable sort by seeds (descending)
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] for a blank query. For a
/// single-source request, returns [`SearchError::Timeout`] if the source
/// overruns `config.search_timeout_seconds`. Source failures never fail
/// the call; they contribute zero records.
pub async fn orchestrate_search<F: PageFetcher>(
    query: &str,
    selector: SourceSelector,
    fetcher: &F,
    config: &SearchConfig,
) -> Result<SearchResponse, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::InvalidInput("query parameter is required".into()));
    }

    let mut results = match selector {
        SourceSelector::All => {
            let outcomes = fan_out(query, &config.sources, fetcher, config).await;
            let mut batches = Vec::with_capacity(outcomes.len());
            for (source, outcome) in outcomes {
                match outcome {
                    Ok(records) => {
                        tracing::debug!(%source, count = records.len(), "source returned results");
                        batches.push(records);
                    }
                    Err(err) => {
                        tracing::warn!(%source, error = %err, "source dropped from results");
                    }
                }
            }
            merge(batches)
        }
        SourceSelector::One(source) => {
            let records = run_branch(source, query, fetcher, config).await?;
            tracing::debug!(%source, count = records.len(), "source returned results");
            records
        }
    };

    rank_by_seeds(&mut results);

    Ok(SearchResponse {
        query: query.to_string(),
        total: results.len(),
        results,
        timestamp: Utc::now(),
    })
}

/// Run every source concurrently and report each branch's outcome.
///
/// All branches settle before this returns; one branch failing or
/// overrunning its deadline never cancels or delays the others. Outcomes
/// are returned in `sources` order.
pub async fn fan_out<F: PageFetcher>(
    query: &str,
    sources: &[Source],
    fetcher: &F,
    config: &SearchConfig,
) -> Vec<(Source, Result<Vec<TorrentRecord>, SearchError>)> {
    let branches: Vec<_> = sources
        .iter()
        .map(|&source| async move {
            let outcome = run_branch(source, query, fetcher, config).await;
            (source, outcome)
        })
        .collect();

    futures::future::join_all(branches).await
}

/// One source's search, bounded by the configured per-source deadline.
async fn run_branch<F: PageFetcher>(
    source: Source,
    query: &str,
    fetcher: &F,
    config: &SearchConfig,
) -> Result<Vec<TorrentRecord>, SearchError> {
    let search = search_source(source, query, fetcher, config);
    if config.search_timeout_seconds == 0 {
        return Ok(search.await);
    }

    tokio::time::timeout(Duration::from_secs(config.search_timeout_seconds), search)
        .await
        .map_err(|_| {
            SearchError::Timeout(format!(
                "{source} exceeded {}s",
                config.search_timeout_seconds
            ))
        })
}
