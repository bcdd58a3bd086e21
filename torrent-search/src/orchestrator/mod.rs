//! Search orchestrator: concurrent fan-out, settle-all collection, ranking.
//!
//! This module fans a query out to the selected sources concurrently,
//! waits for every branch to settle, drops failed branches, merges the
//! rest and sorts by seed count.

pub mod ranking;
pub mod search;
