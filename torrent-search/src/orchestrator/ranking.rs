//! Merge and rank records from multiple sources.
//!
//! Records are concatenated in source order, then sorted by seed count,
//! highest first. The sort is stable: records with equal seed counts keep
//! their concatenation order, so results are reproducible for a fixed
//! set of upstream responses.

use crate::types::TorrentRecord;

/// Concatenate per-source batches in the order given.
pub fn merge(batches: impl IntoIterator<Item = Vec<TorrentRecord>>) -> Vec<TorrentRecord> {
    batches.into_iter().flatten().collect()
}

/// Sort by `seeds` descending, keeping tie order.
pub fn rank_by_seeds(records: &mut [TorrentRecord]) {
    records.sort_by(|a, b| b.seeds.cmp(&a.seeds));
}
